//! Flat row shape for downstream reporting. Pure conversion: writing the rows
//! anywhere is the caller's business.

use serde::{Deserialize, Serialize};

use crate::engine::GameScore;

pub const EXPORT_HEADERS: [&str; 10] = [
    "away_team",
    "home_team",
    "projected_margin_home",
    "home_win_prob",
    "away_win_prob",
    "predicted_winner",
    "edge_score",
    "top_5_factors",
    "confidence_level",
    "data_confidence",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub away_team: String,
    pub home_team: String,
    pub projected_margin_home: f64,
    pub home_win_prob: f64,
    pub away_win_prob: f64,
    /// Team name of the predicted winner.
    pub predicted_winner: String,
    pub edge_score: f64,
    pub top_5_factors: String,
    pub confidence_level: String,
    pub data_confidence: String,
}

impl ExportRow {
    pub fn from_score(score: &GameScore) -> Self {
        Self {
            away_team: score.away_team.clone(),
            home_team: score.home_team.clone(),
            projected_margin_home: round_to(score.projected_margin_home, 1),
            home_win_prob: round_to(score.home_win_prob, 3),
            away_win_prob: round_to(score.away_win_prob, 3),
            predicted_winner: score.predicted_winner_team().to_string(),
            edge_score: round_to(score.edge_score, 2),
            top_5_factors: score.top_factors_summary(),
            confidence_level: score.confidence_level.label().to_string(),
            data_confidence: score.data_confidence.label().to_string(),
        }
    }

    /// Cells in `EXPORT_HEADERS` order.
    pub fn cells(&self) -> Vec<String> {
        vec![
            self.away_team.clone(),
            self.home_team.clone(),
            format!("{:+.1}", self.projected_margin_home),
            format!("{:.3}", self.home_win_prob),
            format!("{:.3}", self.away_win_prob),
            self.predicted_winner.clone(),
            format!("{:+.2}", self.edge_score),
            self.top_5_factors.clone(),
            self.confidence_level.clone(),
            self.data_confidence.clone(),
        ]
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Header row followed by one row per game.
pub fn export_table(scores: &[GameScore]) -> Vec<Vec<String>> {
    let mut rows = vec![EXPORT_HEADERS.iter().map(|h| h.to_string()).collect()];
    rows.extend(scores.iter().map(|s| ExportRow::from_score(s).cells()));
    rows
}
