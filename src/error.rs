use thiserror::Error;

/// Errors raised by the scoring engine.
///
/// Missing data never lands here: it is defaulted to a neutral value and
/// reported through the data-confidence rating instead. These variants cover
/// structurally invalid input and broken configuration only.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("invalid snapshot for {team}: {field} = {value}")]
    InvalidSnapshot {
        team: String,
        field: &'static str,
        value: f64,
    },

    #[error("invalid player entry {player} ({team}): {field} = {value}")]
    InvalidPlayer {
        team: String,
        player: String,
        field: &'static str,
        value: f64,
    },

    #[error("invalid game context: {field} = {value}")]
    InvalidContext { field: &'static str, value: f64 },

    #[error("factor set {set} weights sum to {total}, expected 100")]
    WeightSum { set: String, total: u32 },

    #[error("factor set {set} lists {factor} more than once")]
    DuplicateFactor { set: String, factor: &'static str },

    #[error("factor set {set} gives {factor} a zero weight")]
    ZeroWeight { set: String, factor: &'static str },

    #[error("factor set {0} has no factors")]
    EmptyFactorSet(String),

    #[error("unknown factor: {0}")]
    UnknownFactor(String),

    #[error("unknown factor set: {0}")]
    UnknownFactorSet(String),

    #[error("invalid league params: {0}")]
    InvalidParams(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
