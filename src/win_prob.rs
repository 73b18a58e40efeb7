use std::fmt;

use serde::{Deserialize, Serialize};

use crate::factors::FactorResult;
use crate::league_params::LeagueParams;
use crate::schedule::schedule_stress;
use crate::snapshot::{GameContext, Side};

pub const EDGE_LIMIT: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceBucket {
    High,
    Medium,
    Low,
}

/// How complete the inputs were, independent of how lopsided the pick is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataConfidence {
    High,
    Medium,
    Low,
}

impl ConfidenceBucket {
    pub fn label(self) -> &'static str {
        match self {
            ConfidenceBucket::High => "HIGH",
            ConfidenceBucket::Medium => "MEDIUM",
            ConfidenceBucket::Low => "LOW",
        }
    }
}

impl DataConfidence {
    pub fn label(self) -> &'static str {
        match self {
            DataConfidence::High => "HIGH",
            DataConfidence::Medium => "MEDIUM",
            DataConfidence::Low => "LOW",
        }
    }
}

impl fmt::Display for ConfidenceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for DataConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinProbRow {
    pub edge_score: f64,
    pub projected_margin_home: f64,
    pub home_win_prob: f64,
    pub away_win_prob: f64,
    pub predicted_winner: Side,
    /// max(home_win_prob, away_win_prob).
    pub confidence: f64,
    /// Confidence after schedule-stress and instability compression; the
    /// bucket is read from this.
    pub adjusted_confidence: f64,
    pub confirming_signals: usize,
    pub bucket: ConfidenceBucket,
}

/// Clamp to [-100, 100]. NaN collapses to a neutral edge.
pub fn clamp_edge(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(-EDGE_LIMIT, EDGE_LIMIT)
    }
}

pub fn edge_score(results: &[FactorResult]) -> f64 {
    clamp_edge(results.iter().map(|r| r.contribution).sum())
}

/// `(home, away)` win probabilities. The favourite's probability comes from
/// the logistic and the underdog's is its complement; since the favourite is
/// at least 0.5 the subtraction is exact and the pair sums to exactly 1.0.
pub fn win_probabilities(edge: f64, params: &LeagueParams) -> (f64, f64) {
    let favourite = 1.0 / (1.0 + (-edge.abs() / params.prob_scale).exp());
    let underdog = 1.0 - favourite;
    if edge >= 0.0 {
        (favourite, underdog)
    } else {
        (underdog, favourite)
    }
}

pub fn projected_margin(edge: f64, params: &LeagueParams) -> f64 {
    edge / params.margin_scale
}

/// Home on an exact tie.
pub fn predicted_winner(edge: f64) -> Side {
    if edge >= 0.0 { Side::Home } else { Side::Away }
}

/// Factors whose reading is strong and points the same way as the pick.
pub fn confirming_signals(results: &[FactorResult], winner: Side, params: &LeagueParams) -> usize {
    results
        .iter()
        .filter(|r| r.kind.can_confirm())
        .filter(|r| r.signed_value * winner.sign() >= params.strong_signal_fraction)
        .count()
}

pub fn confidence_bucket(confidence: f64, confirming: usize, params: &LeagueParams) -> ConfidenceBucket {
    if confidence >= params.high_confidence && confirming >= params.min_confirming_signals {
        ConfidenceBucket::High
    } else if confidence >= params.medium_confidence {
        ConfidenceBucket::Medium
    } else {
        ConfidenceBucket::Low
    }
}

/// Confidence multiplier for one team's roster instability.
pub fn instability_multiplier(level: Option<f64>, params: &LeagueParams) -> f64 {
    let i = &params.instability;
    match level {
        Some(v) if v >= i.high_threshold => i.high_confidence_mult,
        Some(v) if v >= i.low_threshold => i.low_confidence_mult,
        _ => 1.0,
    }
}

/// Multiplier in (0, 1] applied to confidence before bucketing. The more
/// stressed schedule and the less stable rotation of the two teams decide it;
/// a quiet week with settled rosters leaves confidence untouched.
pub fn confidence_multiplier(context: &GameContext, params: &LeagueParams) -> f64 {
    let stress = schedule_stress(&context.home_schedule, params)
        .max(schedule_stress(&context.away_schedule, params));
    let schedule = 1.0 - params.stress.confidence_compression * stress;
    let instability = instability_multiplier(context.home_instability, params)
        .min(instability_multiplier(context.away_instability, params));
    schedule * instability
}

/// Inputs that decide how much the data itself can be trusted.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputCoverage<'a> {
    pub home_defaulted: &'a [&'static str],
    pub away_defaulted: &'a [&'static str],
    pub home_usable_players: usize,
    pub away_usable_players: usize,
}

/// LOW when a core input (net rating, a usable roster) was missing for either
/// team, MEDIUM when only minor fields were defaulted, HIGH otherwise.
pub fn data_confidence(coverage: &InputCoverage<'_>) -> DataConfidence {
    let core_missing = coverage.home_defaulted.contains(&"net_rating")
        || coverage.away_defaulted.contains(&"net_rating")
        || coverage.home_usable_players == 0
        || coverage.away_usable_players == 0;
    if core_missing {
        DataConfidence::Low
    } else if !coverage.home_defaulted.is_empty() || !coverage.away_defaulted.is_empty() {
        DataConfidence::Medium
    } else {
        DataConfidence::High
    }
}

/// Aggregate factor rows. `multiplier` comes from `confidence_multiplier`;
/// it only moves the bucket, never the probabilities.
pub fn compute_win_prob(results: &[FactorResult], multiplier: f64, params: &LeagueParams) -> WinProbRow {
    let edge_score = edge_score(results);
    let (home_win_prob, away_win_prob) = win_probabilities(edge_score, params);
    let predicted_winner = predicted_winner(edge_score);
    let confidence = home_win_prob.max(away_win_prob);
    let adjusted_confidence = (confidence * multiplier).clamp(0.5, confidence);
    let confirming = confirming_signals(results, predicted_winner, params);
    WinProbRow {
        edge_score,
        projected_margin_home: projected_margin(edge_score, params),
        home_win_prob,
        away_win_prob,
        predicted_winner,
        confidence,
        adjusted_confidence,
        confirming_signals: confirming,
        bucket: confidence_bucket(adjusted_confidence, confirming, params),
    }
}
