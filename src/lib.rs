pub mod availability;
pub mod engine;
pub mod error;
pub mod explain;
pub mod export;
pub mod factor_set;
pub mod factors;
pub mod fake_slate;
pub mod league_params;
pub mod logging;
pub mod player_impact;
pub mod rotation;
pub mod schedule;
pub mod signal;
pub mod snapshot;
pub mod star_impact;
pub mod win_prob;

pub use engine::{EngineConfig, GameScore, score_game, score_matchup, score_slate};
pub use error::{EngineError, EngineResult};
pub use factor_set::FactorSet;
pub use league_params::LeagueParams;
pub use snapshot::{
    AvailabilityStatus, GameContext, Matchup, PlayerEntry, ScheduleLoad, Side, TeamSnapshot,
};
