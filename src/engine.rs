//! `score_game`: snapshot in, `GameScore` out.
//!
//! Flow is one-way: validate, fill defaults, resolve availability, run the
//! rotation state machine, evaluate every configured factor, aggregate,
//! explain. Nothing is retained between calls, so a slate can be scored in
//! parallel with no coordination.

use std::env;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::availability::{self, ResolvedAvailability};
use crate::error::EngineResult;
use crate::explain;
use crate::factor_set::FactorSet;
use crate::factors::{self, FactorInput, FactorKind, FactorResult};
use crate::league_params::LeagueParams;
use crate::rotation::{self, RotationOutcome};
use crate::snapshot::{GameContext, Matchup, PlayerEntry, Side, TeamSnapshot};
use crate::win_prob::{self, ConfidenceBucket, DataConfidence, InputCoverage};

pub const SLATE_THREADS_ENV: &str = "NBA_EDGE_SLATE_THREADS";

/// Immutable configuration handed to every scoring call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub params: LeagueParams,
    #[serde(default)]
    pub factor_set: FactorSet,
}

impl EngineConfig {
    pub fn new(params: LeagueParams, factor_set: FactorSet) -> EngineResult<Self> {
        params.validate()?;
        Ok(Self { params, factor_set })
    }

    /// Params from `NBA_EDGE_PARAMS` and factor set from `NBA_EDGE_FACTOR_SET`.
    pub fn from_env() -> anyhow::Result<Self> {
        let params = LeagueParams::from_env()?;
        let factor_set = FactorSet::from_env()?;
        Ok(Self::new(params, factor_set)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameScore {
    pub away_team: String,
    pub home_team: String,
    pub factor_set: String,
    /// In factor-set declaration order.
    pub factors: Vec<FactorResult>,
    pub edge_score: f64,
    pub projected_margin_home: f64,
    pub home_win_prob: f64,
    pub away_win_prob: f64,
    pub confidence: f64,
    /// `confidence` after schedule-stress and roster-instability compression.
    pub adjusted_confidence: f64,
    pub confidence_level: ConfidenceBucket,
    pub confirming_signals: usize,
    pub predicted_winner: Side,
    pub data_confidence: DataConfidence,
    /// `"home.pace"`-style names of every metric that fell back to a default.
    pub defaulted_fields: Vec<String>,
    pub availability: ResolvedAvailability,
    pub rotation: RotationOutcome,
}

impl GameScore {
    pub fn factor(&self, kind: FactorKind) -> Option<&FactorResult> {
        self.factors.iter().find(|f| f.kind == kind)
    }

    pub fn top_factors(&self) -> Vec<FactorResult> {
        explain::top_factors(&self.factors, explain::SUMMARY_FACTORS)
    }

    pub fn top_factors_summary(&self) -> String {
        explain::summary_line(&self.factors)
    }

    pub fn predicted_winner_team(&self) -> &str {
        match self.predicted_winner {
            Side::Home => &self.home_team,
            Side::Away => &self.away_team,
        }
    }
}

fn validate_inputs(
    config: &EngineConfig,
    home: &TeamSnapshot,
    away: &TeamSnapshot,
    home_roster: &[PlayerEntry],
    away_roster: &[PlayerEntry],
    context: &GameContext,
) -> EngineResult<()> {
    config.params.validate()?;
    home.validate()?;
    away.validate()?;
    for player in home_roster.iter().chain(away_roster) {
        player.validate()?;
    }
    context.validate()
}

fn prefixed(side: &str, fields: &[&'static str]) -> impl Iterator<Item = String> {
    fields.iter().map(move |f| format!("{side}.{f}"))
}

pub fn score_game(
    config: &EngineConfig,
    home: &TeamSnapshot,
    away: &TeamSnapshot,
    home_roster: &[PlayerEntry],
    away_roster: &[PlayerEntry],
    context: &GameContext,
) -> EngineResult<GameScore> {
    validate_inputs(config, home, away, home_roster, away_roster, context)?;
    let params = &config.params;

    let (home_stats, home_defaulted) = home.resolve(params);
    let (away_stats, away_defaulted) = away.resolve(params);

    let availability = availability::resolve(
        &home.team,
        &away.team,
        home_roster,
        away_roster,
        (home.net_rating.is_some(), away.net_rating.is_some()),
        params,
    );
    for (snap, team) in [(home, &availability.home), (away, &availability.away)] {
        if snap.net_rating.is_none() {
            tracing::warn!(team = %snap.team, "net rating missing, using neutral default");
        }
        if team.usable_players == 0 {
            tracing::warn!(team = %snap.team, "no usable roster, star factors neutral for this team");
        }
    }

    let rotation = rotation::evaluate_rotation(home_roster, away_roster, &availability, params);

    let input = FactorInput {
        home: &home_stats,
        away: &away_stats,
        context,
        availability: &availability,
        rotation: &rotation,
        params,
    };
    let results: Vec<FactorResult> = config
        .factor_set
        .factors()
        .iter()
        .map(|spec| factors::score_factor(spec.kind, spec.weight, &input))
        .collect();

    let multiplier = win_prob::confidence_multiplier(context, params);
    let win = win_prob::compute_win_prob(&results, multiplier, params);
    let data_confidence = win_prob::data_confidence(&InputCoverage {
        home_defaulted: &home_defaulted,
        away_defaulted: &away_defaulted,
        home_usable_players: availability.home.usable_players,
        away_usable_players: availability.away.usable_players,
    });

    tracing::debug!(
        home = %home.team,
        away = %away.team,
        edge = win.edge_score,
        multiplier,
        bucket = %win.bucket,
        data = %data_confidence,
        "game scored"
    );

    Ok(GameScore {
        away_team: away.team.clone(),
        home_team: home.team.clone(),
        factor_set: config.factor_set.name().to_string(),
        factors: results,
        edge_score: win.edge_score,
        projected_margin_home: win.projected_margin_home,
        home_win_prob: win.home_win_prob,
        away_win_prob: win.away_win_prob,
        confidence: win.confidence,
        adjusted_confidence: win.adjusted_confidence,
        confidence_level: win.bucket,
        confirming_signals: win.confirming_signals,
        predicted_winner: win.predicted_winner,
        data_confidence,
        defaulted_fields: prefixed("home", &home_defaulted)
            .chain(prefixed("away", &away_defaulted))
            .collect(),
        availability,
        rotation,
    })
}

pub fn score_matchup(config: &EngineConfig, matchup: &Matchup) -> EngineResult<GameScore> {
    score_game(
        config,
        &matchup.home,
        &matchup.away,
        &matchup.home_roster,
        &matchup.away_roster,
        &matchup.context,
    )
}

/// Score every game of a slate in parallel. Results keep the slate's order;
/// one malformed game fails alone.
pub fn score_slate(config: &EngineConfig, games: &[Matchup]) -> Vec<EngineResult<GameScore>> {
    let results: Vec<EngineResult<GameScore>> = games
        .par_iter()
        .map(|game| score_matchup(config, game))
        .collect();

    let failures = results.iter().filter(|r| r.is_err()).count();
    for (game, result) in games.iter().zip(&results) {
        if let Err(err) = result {
            tracing::warn!(home = %game.home.team, away = %game.away.team, error = %err, "game not scored");
        }
    }
    tracing::info!(
        games = games.len(),
        failures,
        factor_set = config.factor_set.name(),
        "slate scored"
    );
    results
}

/// Dedicated pool sized by `NBA_EDGE_SLATE_THREADS`; `None` means the global
/// rayon pool.
pub fn build_slate_pool() -> Option<rayon::ThreadPool> {
    let threads = env::var(SLATE_THREADS_ENV)
        .ok()
        .and_then(|val| val.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)?;
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .ok()
}

pub fn with_slate_pool<T>(pool: Option<&rayon::ThreadPool>, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    match pool {
        Some(pool) => pool.install(action),
        None => action(),
    }
}
