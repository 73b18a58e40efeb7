use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

pub const PARAMS_PATH_ENV: &str = "NBA_EDGE_PARAMS";

/// Normalisation scale per factor: the raw differential that saturates the
/// factor at ±1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorScales {
    pub net_rating: f64,
    pub off_vs_def: f64,
    pub turnover: f64,
    pub shot_quality: f64,
    pub three_point: f64,
    pub ft_rate: f64,
    pub rebounding: f64,
    pub pace: f64,
    pub bench_share: f64,
    pub rest: f64,
    pub rim: f64,
    pub perimeter: f64,
    pub matchup: f64,
    pub clutch: f64,
    pub variance: f64,
    pub fouls: f64,
    pub home_road_split: f64,
}

impl Default for FactorScales {
    fn default() -> Self {
        Self {
            net_rating: 10.0,
            off_vs_def: 10.0,
            turnover: 4.0,
            shot_quality: 6.0,
            three_point: 6.0,
            ft_rate: 0.08,
            rebounding: 6.0,
            pace: 6.0,
            bench_share: 0.10,
            rest: 2.0,
            rim: 6.0,
            perimeter: 6.0,
            matchup: 4.0,
            clutch: 5.0,
            variance: 0.10,
            fouls: 4.0,
            home_road_split: 6.0,
        }
    }
}

impl FactorScales {
    fn entries(&self) -> [(&'static str, f64); 17] {
        [
            ("net_rating", self.net_rating),
            ("off_vs_def", self.off_vs_def),
            ("turnover", self.turnover),
            ("shot_quality", self.shot_quality),
            ("three_point", self.three_point),
            ("ft_rate", self.ft_rate),
            ("rebounding", self.rebounding),
            ("pace", self.pace),
            ("bench_share", self.bench_share),
            ("rest", self.rest),
            ("rim", self.rim),
            ("perimeter", self.perimeter),
            ("matchup", self.matchup),
            ("clutch", self.clutch),
            ("variance", self.variance),
            ("fouls", self.fouls),
            ("home_road_split", self.home_road_split),
        ]
    }
}

/// Schedule-stress components. A team's raw stress is the sum of the parts
/// that apply, capped at `max_raw`, then normalised to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressParams {
    pub back_to_back: f64,
    pub three_in_four: f64,
    pub four_in_five: f64,
    /// Stress added by a trip of `travel_full_km` or longer.
    pub travel: f64,
    pub travel_full_km: f64,
    pub max_raw: f64,
    /// Rest days a fully stressed schedule costs in the rest/fatigue factor.
    pub rest_days_penalty: f64,
    /// Share of confidence removed at full stress.
    pub confidence_compression: f64,
}

impl Default for StressParams {
    fn default() -> Self {
        Self {
            back_to_back: 1.0,
            three_in_four: 0.6,
            four_in_five: 0.8,
            travel: 0.6,
            travel_full_km: 2500.0,
            max_raw: 2.4,
            rest_days_penalty: 1.0,
            confidence_compression: 0.05,
        }
    }
}

/// Roster-instability levels and the confidence multiplier each one applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstabilityParams {
    pub low_threshold: f64,
    pub high_threshold: f64,
    pub low_confidence_mult: f64,
    pub high_confidence_mult: f64,
}

impl Default for InstabilityParams {
    fn default() -> Self {
        Self {
            low_threshold: 0.10,
            high_threshold: 0.30,
            low_confidence_mult: 0.97,
            high_confidence_mult: 0.93,
        }
    }
}

/// League-wide tunable constants. Immutable once built and passed into every
/// scoring call, so a test configuration and a production one can run side
/// by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueParams {
    /// Edge points per logistic unit: `p = 1 / (1 + exp(-edge / prob_scale))`.
    pub prob_scale: f64,
    /// Edge points per point of projected margin.
    pub margin_scale: f64,
    /// Home-court points that give the home-court factor its full value.
    pub home_court_full_points: f64,
    pub dampener_min: f64,
    pub dampener_max: f64,
    /// Games missed before an absence counts as priced into the net rating.
    pub established_absence_games: u32,
    /// Largest edge shift the rotation replacement factor may produce.
    pub rotation_ceiling_points: f64,
    /// Most a short-handed team can gain when its replacement outscores the
    /// missing star.
    pub replacement_bonus_points: f64,
    pub high_confidence: f64,
    pub medium_confidence: f64,
    /// A factor is a strong signal when |signed value| reaches this fraction.
    pub strong_signal_fraction: f64,
    pub min_confirming_signals: usize,
    pub min_rotation_mpg: f64,
    pub replacement_min_mpg: f64,
    pub replacement_max_mpg: f64,
    pub default_star_mpg: f64,
    pub default_bench_mpg: f64,
    /// League-typical (home net - road net) gap; the split factor measures the
    /// excess over it.
    pub typical_home_road_split: f64,
    pub max_rest_days: u32,
    pub scales: FactorScales,
    pub stress: StressParams,
    pub instability: InstabilityParams,
}

impl Default for LeagueParams {
    fn default() -> Self {
        Self::defaults()
    }
}

impl LeagueParams {
    pub fn defaults() -> Self {
        Self {
            prob_scale: 12.0,
            margin_scale: 6.0,
            home_court_full_points: 3.0,
            dampener_min: 0.35,
            dampener_max: 0.65,
            established_absence_games: 10,
            rotation_ceiling_points: 4.0,
            replacement_bonus_points: 1.0,
            high_confidence: 0.72,
            medium_confidence: 0.60,
            strong_signal_fraction: 0.60,
            min_confirming_signals: 2,
            min_rotation_mpg: 20.0,
            replacement_min_mpg: 10.0,
            replacement_max_mpg: 30.0,
            default_star_mpg: 32.0,
            default_bench_mpg: 15.0,
            typical_home_road_split: 2.0,
            max_rest_days: 4,
            scales: FactorScales::default(),
            stress: StressParams::default(),
            instability: InstabilityParams::default(),
        }
    }

    /// Midpoint of the dampener range, used when an absence is flagged as
    /// priced in without a games-missed count.
    pub fn dampener_midpoint(&self) -> f64 {
        (self.dampener_min + self.dampener_max) / 2.0
    }

    pub fn validate(&self) -> EngineResult<()> {
        let positive = [
            ("prob_scale", self.prob_scale),
            ("margin_scale", self.margin_scale),
            ("home_court_full_points", self.home_court_full_points),
            ("rotation_ceiling_points", self.rotation_ceiling_points),
            ("default_star_mpg", self.default_star_mpg),
            ("default_bench_mpg", self.default_bench_mpg),
        ];
        for (name, v) in positive.into_iter().chain(self.scales.entries()) {
            if !(v.is_finite() && v > 0.0) {
                return Err(EngineError::InvalidParams(format!(
                    "{name} must be positive, got {v}"
                )));
            }
        }

        let (lo, hi) = (self.dampener_min, self.dampener_max);
        if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
            return Err(EngineError::InvalidParams(format!(
                "dampener range [{lo}, {hi}] must sit inside [0, 1]"
            )));
        }

        for (name, v) in [
            ("high_confidence", self.high_confidence),
            ("medium_confidence", self.medium_confidence),
        ] {
            if !(v > 0.5 && v <= 1.0) {
                return Err(EngineError::InvalidParams(format!(
                    "{name} must be in (0.5, 1], got {v}"
                )));
            }
        }
        if self.medium_confidence > self.high_confidence {
            return Err(EngineError::InvalidParams(
                "medium_confidence exceeds high_confidence".to_string(),
            ));
        }

        if !(self.strong_signal_fraction > 0.0 && self.strong_signal_fraction <= 1.0) {
            return Err(EngineError::InvalidParams(format!(
                "strong_signal_fraction must be in (0, 1], got {}",
                self.strong_signal_fraction
            )));
        }

        for (name, v) in [
            ("min_rotation_mpg", self.min_rotation_mpg),
            ("replacement_min_mpg", self.replacement_min_mpg),
            ("replacement_max_mpg", self.replacement_max_mpg),
            ("typical_home_road_split", self.typical_home_road_split),
        ] {
            if !v.is_finite() {
                return Err(EngineError::InvalidParams(format!("{name} is not finite")));
            }
        }
        if self.replacement_min_mpg > self.replacement_max_mpg {
            return Err(EngineError::InvalidParams(
                "replacement MPG window is inverted".to_string(),
            ));
        }
        if !(0.0..=self.rotation_ceiling_points).contains(&self.replacement_bonus_points) {
            return Err(EngineError::InvalidParams(format!(
                "replacement_bonus_points must be in [0, {}], got {}",
                self.rotation_ceiling_points, self.replacement_bonus_points
            )));
        }
        self.validate_stress()?;
        self.validate_instability()
    }

    fn validate_stress(&self) -> EngineResult<()> {
        let s = &self.stress;
        for (name, v) in [
            ("stress.back_to_back", s.back_to_back),
            ("stress.three_in_four", s.three_in_four),
            ("stress.four_in_five", s.four_in_five),
            ("stress.travel", s.travel),
            ("stress.rest_days_penalty", s.rest_days_penalty),
        ] {
            if !(v.is_finite() && v >= 0.0) {
                return Err(EngineError::InvalidParams(format!(
                    "{name} must be non-negative, got {v}"
                )));
            }
        }
        for (name, v) in [
            ("stress.travel_full_km", s.travel_full_km),
            ("stress.max_raw", s.max_raw),
        ] {
            if !(v.is_finite() && v > 0.0) {
                return Err(EngineError::InvalidParams(format!(
                    "{name} must be positive, got {v}"
                )));
            }
        }
        if !(0.0..1.0).contains(&s.confidence_compression) {
            return Err(EngineError::InvalidParams(format!(
                "stress.confidence_compression must be in [0, 1), got {}",
                s.confidence_compression
            )));
        }
        Ok(())
    }

    fn validate_instability(&self) -> EngineResult<()> {
        let i = &self.instability;
        if !(0.0 <= i.low_threshold && i.low_threshold <= i.high_threshold && i.high_threshold <= 1.0) {
            return Err(EngineError::InvalidParams(format!(
                "instability thresholds [{}, {}] must be ordered inside [0, 1]",
                i.low_threshold, i.high_threshold
            )));
        }
        for (name, v) in [
            ("instability.low_confidence_mult", i.low_confidence_mult),
            ("instability.high_confidence_mult", i.high_confidence_mult),
        ] {
            if !(v > 0.0 && v <= 1.0) {
                return Err(EngineError::InvalidParams(format!(
                    "{name} must be in (0, 1], got {v}"
                )));
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read league params {}", path.display()))?;
        let params: LeagueParams =
            serde_json::from_str(&raw).context("parse league params")?;
        params.validate().context("validate league params")?;
        Ok(params)
    }

    /// Params from the file named by `NBA_EDGE_PARAMS`, or the defaults when
    /// the variable is unset.
    pub fn from_env() -> Result<Self> {
        match params_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::defaults()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(self).context("serialize league params")?;
        fs::write(&tmp, json).context("write league params")?;
        fs::rename(&tmp, path).context("swap league params")?;
        Ok(())
    }
}

fn params_path() -> Option<PathBuf> {
    env::var(PARAMS_PATH_ENV)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(LeagueParams::defaults().validate().is_ok());
        assert!((LeagueParams::defaults().dampener_midpoint() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let params: LeagueParams =
            serde_json::from_str(r#"{"prob_scale": 10.0, "scales": {"pace": 5.0}}"#).unwrap();
        assert_eq!(params.prob_scale, 10.0);
        assert_eq!(params.margin_scale, 6.0);
        assert_eq!(params.scales.pace, 5.0);
        assert_eq!(params.scales.net_rating, 10.0);
    }

    #[test]
    fn rejects_inverted_dampener() {
        let params = LeagueParams {
            dampener_min: 0.7,
            dampener_max: 0.4,
            ..LeagueParams::defaults()
        };
        assert!(matches!(
            params.validate(),
            Err(EngineError::InvalidParams(_))
        ));
    }

    #[test]
    fn rejects_bonus_above_ceiling_and_bad_stress() {
        let params = LeagueParams {
            replacement_bonus_points: 5.0,
            ..LeagueParams::defaults()
        };
        assert!(params.validate().is_err());

        let mut params = LeagueParams::defaults();
        params.stress.confidence_compression = 1.0;
        assert!(params.validate().is_err());

        let mut params = LeagueParams::defaults();
        params.instability.low_threshold = 0.5;
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_zero_scale() {
        let mut params = LeagueParams::defaults();
        params.scales.rebounding = 0.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn save_then_load_keeps_overrides() {
        let dir = std::env::temp_dir().join(format!("nba_edge_params_{}", std::process::id()));
        let path = dir.join("params.json");
        let params = LeagueParams {
            prob_scale: 13.5,
            ..LeagueParams::defaults()
        };
        params.save(&path).unwrap();
        let loaded = LeagueParams::load(&path).unwrap();
        assert_eq!(loaded, params);
        let _ = fs::remove_dir_all(dir);
    }
}
