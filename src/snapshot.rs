use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::league_params::LeagueParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn label(self) -> &'static str {
        match self {
            Side::Home => "HOME",
            Side::Away => "AWAY",
        }
    }

    /// +1 for home, -1 for away: the sign a contribution carries when it
    /// favours this side.
    pub fn sign(self) -> f64 {
        match self {
            Side::Home => 1.0,
            Side::Away => -1.0,
        }
    }
}

/// Game-day availability of a rostered player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    #[default]
    Available,
    Probable,
    Questionable,
    Doubtful,
    Out,
}

static STATUS_ALIASES: Lazy<HashMap<&'static str, AvailabilityStatus>> = Lazy::new(|| {
    use AvailabilityStatus::*;
    HashMap::from([
        ("out", Out),
        ("o", Out),
        ("inactive", Out),
        ("dnp", Out),
        ("doubtful", Doubtful),
        ("d", Doubtful),
        ("unlikely", Doubtful),
        ("questionable", Questionable),
        ("q", Questionable),
        ("gtd", Questionable),
        ("game time decision", Questionable),
        ("day-to-day", Questionable),
        ("probable", Probable),
        ("p", Probable),
        ("likely", Probable),
        ("available", Available),
        ("active", Available),
        ("healthy", Available),
        ("", Available),
    ])
});

impl AvailabilityStatus {
    /// Parse a feed status string. Unknown strings count as available, since a
    /// player with no report is assumed to play.
    pub fn parse(raw: &str) -> Self {
        let key = raw.trim().to_lowercase();
        match STATUS_ALIASES.get(key.as_str()) {
            Some(status) => *status,
            None => {
                tracing::warn!(status = raw, "unknown availability status, treating as available");
                AvailabilityStatus::Available
            }
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            AvailabilityStatus::Out => 0.0,
            AvailabilityStatus::Doubtful => 0.25,
            AvailabilityStatus::Questionable => 0.60,
            AvailabilityStatus::Probable => 0.85,
            AvailabilityStatus::Available => 1.0,
        }
    }

    /// OUT or DOUBTFUL: the statuses that count as a star absence.
    pub fn is_absence(self) -> bool {
        matches!(self, AvailabilityStatus::Out | AvailabilityStatus::Doubtful)
    }

    /// PROBABLE or AVAILABLE: expected to play and soak up minutes.
    pub fn expected_to_play(self) -> bool {
        matches!(
            self,
            AvailabilityStatus::Probable | AvailabilityStatus::Available
        )
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AvailabilityStatus::Available => "Available",
            AvailabilityStatus::Probable => "Probable",
            AvailabilityStatus::Questionable => "Questionable",
            AvailabilityStatus::Doubtful => "Doubtful",
            AvailabilityStatus::Out => "Out",
        };
        f.write_str(s)
    }
}

impl<'de> Deserialize<'de> for AvailabilityStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(AvailabilityStatus::parse(&raw))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    #[serde(default)]
    pub team: String,
    #[serde(default)]
    pub ppg: Option<f64>,
    #[serde(default)]
    pub apg: Option<f64>,
    #[serde(default)]
    pub mpg: Option<f64>,
    /// Points per minute when the feed carries it directly.
    #[serde(default)]
    pub ppm: Option<f64>,
    #[serde(default)]
    pub status: AvailabilityStatus,
    #[serde(default)]
    pub reason: Option<String>,
    /// Ingestion's judgement that this absence is already in the net rating.
    #[serde(default)]
    pub priced_in: Option<bool>,
    /// Consecutive games missed, when the feed tracks it.
    #[serde(default)]
    pub games_missed: Option<u32>,
}

impl PlayerEntry {
    pub fn new(name: &str, team: &str, ppg: f64, apg: f64, mpg: f64) -> Self {
        Self {
            name: name.to_string(),
            team: team.to_string(),
            ppg: Some(ppg),
            apg: Some(apg),
            mpg: Some(mpg),
            ppm: None,
            status: AvailabilityStatus::Available,
            reason: None,
            priced_in: None,
            games_missed: None,
        }
    }

    pub fn with_status(mut self, status: AvailabilityStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_games_missed(mut self, games: u32) -> Self {
        self.games_missed = Some(games);
        self
    }

    pub fn with_priced_in(mut self, priced_in: bool) -> Self {
        self.priced_in = Some(priced_in);
        self
    }

    /// Points per minute: the explicit field, else PPG / MPG, falling back to
    /// `fallback_mpg` minutes when MPG is unknown.
    pub fn points_per_minute(&self, fallback_mpg: f64) -> f64 {
        if let Some(ppm) = self.ppm {
            return ppm;
        }
        let ppg = self.ppg.unwrap_or(0.0);
        let mpg = self.mpg.unwrap_or(fallback_mpg);
        ppg / mpg.max(1.0)
    }

    pub fn validate(&self) -> EngineResult<()> {
        for (field, value) in [
            ("ppg", self.ppg),
            ("apg", self.apg),
            ("mpg", self.mpg),
            ("ppm", self.ppm),
        ] {
            let Some(v) = value else { continue };
            if !v.is_finite() || v < 0.0 {
                return Err(EngineError::InvalidPlayer {
                    team: self.team.clone(),
                    player: self.name.clone(),
                    field,
                    value: v,
                });
            }
        }
        Ok(())
    }
}

/// One team's pregame metrics. Every metric is optional: the ingestion side
/// leaves a field empty when its source had nothing, and the engine fills a
/// league-average default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamSnapshot {
    pub team: String,
    pub net_rating: Option<f64>,
    pub off_rating: Option<f64>,
    pub def_rating: Option<f64>,
    pub pace: Option<f64>,
    /// Rebound percentage, 0-100.
    pub reb_pct: Option<f64>,
    /// Turnover percentage, 0-100.
    pub tov_pct: Option<f64>,
    pub efg_pct: Option<f64>,
    pub fg3_pct: Option<f64>,
    /// Share of field-goal attempts taken from three.
    pub fg3a_rate: Option<f64>,
    pub ft_rate: Option<f64>,
    pub opp_fg3_pct: Option<f64>,
    /// Home net rating minus road net rating.
    pub home_road_split: Option<f64>,
    /// Share of team points scored by the bench.
    pub bench_share: Option<f64>,
    pub clutch_net_rating: Option<f64>,
    pub fouls_per_game: Option<f64>,
}

impl TeamSnapshot {
    pub fn empty(team: &str) -> Self {
        Self {
            team: team.to_string(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> EngineResult<()> {
        let signed = [
            ("net_rating", self.net_rating),
            ("home_road_split", self.home_road_split),
            ("clutch_net_rating", self.clutch_net_rating),
        ];
        let non_negative = [
            ("off_rating", self.off_rating),
            ("def_rating", self.def_rating),
            ("pace", self.pace),
            ("fouls_per_game", self.fouls_per_game),
        ];
        // Upper bound per field: 0-100 percentages and 0-1 fractions. A feed
        // sending 54.5 for an eFG fraction fails here instead of saturating.
        let bounded = [
            ("reb_pct", self.reb_pct, 100.0),
            ("tov_pct", self.tov_pct, 100.0),
            ("efg_pct", self.efg_pct, 1.0),
            ("fg3_pct", self.fg3_pct, 1.0),
            ("fg3a_rate", self.fg3a_rate, 1.0),
            ("ft_rate", self.ft_rate, 1.0),
            ("opp_fg3_pct", self.opp_fg3_pct, 1.0),
            ("bench_share", self.bench_share, 1.0),
        ];

        for (field, value) in signed {
            if let Some(v) = value
                && !v.is_finite()
            {
                return Err(self.invalid(field, v));
            }
        }
        for (field, value) in non_negative {
            if let Some(v) = value
                && (!v.is_finite() || v < 0.0)
            {
                return Err(self.invalid(field, v));
            }
        }
        for (field, value, max) in bounded {
            if let Some(v) = value
                && !(0.0..=max).contains(&v)
            {
                return Err(self.invalid(field, v));
            }
        }
        Ok(())
    }

    fn invalid(&self, field: &'static str, value: f64) -> EngineError {
        EngineError::InvalidSnapshot {
            team: self.team.clone(),
            field,
            value,
        }
    }

    /// Fill every empty metric with its league-average default and record
    /// which ones were filled.
    pub fn resolve(&self, params: &LeagueParams) -> (TeamStats, Vec<&'static str>) {
        let mut defaulted = Vec::new();
        let mut pick = |field: &'static str, value: Option<f64>, default: f64| match value {
            Some(v) => v,
            None => {
                defaulted.push(field);
                default
            }
        };

        let stats = TeamStats {
            net_rating: pick("net_rating", self.net_rating, 0.0),
            off_rating: pick("off_rating", self.off_rating, 110.0),
            def_rating: pick("def_rating", self.def_rating, 110.0),
            pace: pick("pace", self.pace, 100.0),
            reb_pct: pick("reb_pct", self.reb_pct, 50.0),
            tov_pct: pick("tov_pct", self.tov_pct, 14.0),
            efg_pct: pick("efg_pct", self.efg_pct, 0.52),
            fg3_pct: pick("fg3_pct", self.fg3_pct, 0.36),
            fg3a_rate: pick("fg3a_rate", self.fg3a_rate, 0.40),
            ft_rate: pick("ft_rate", self.ft_rate, 0.25),
            opp_fg3_pct: pick("opp_fg3_pct", self.opp_fg3_pct, 0.36),
            home_road_split: pick(
                "home_road_split",
                self.home_road_split,
                params.typical_home_road_split,
            ),
            bench_share: pick("bench_share", self.bench_share, 0.33),
            fouls_per_game: pick("fouls_per_game", self.fouls_per_game, 20.0),
            clutch_net_rating: self.clutch_net_rating,
        };
        (stats, defaulted)
    }
}

/// A team snapshot with every default applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamStats {
    pub net_rating: f64,
    pub off_rating: f64,
    pub def_rating: f64,
    pub pace: f64,
    pub reb_pct: f64,
    pub tov_pct: f64,
    pub efg_pct: f64,
    pub fg3_pct: f64,
    pub fg3a_rate: f64,
    pub ft_rate: f64,
    pub opp_fg3_pct: f64,
    pub home_road_split: f64,
    pub bench_share: f64,
    pub fouls_per_game: f64,
    /// Stays optional: the clutch factor falls back to an offensive proxy.
    pub clutch_net_rating: Option<f64>,
}

fn default_rest_days() -> u32 {
    1
}

/// Recent schedule for one team going into tonight's game. The default is a
/// normal week with no travel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleLoad {
    pub back_to_back: bool,
    /// Third game in four nights.
    pub three_in_four: bool,
    /// Fourth game in five nights.
    pub four_in_five: bool,
    /// Distance from the previous game's city.
    pub travel_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameContext {
    #[serde(default = "default_rest_days")]
    pub home_rest_days: u32,
    #[serde(default = "default_rest_days")]
    pub away_rest_days: u32,
    /// Home-court points for this venue. `None` means a regular home game
    /// worth the league's full home-court value; `Some(0.0)` is a neutral site.
    #[serde(default)]
    pub home_court_points: Option<f64>,
    #[serde(default)]
    pub home_schedule: ScheduleLoad,
    #[serde(default)]
    pub away_schedule: ScheduleLoad,
    /// Share of the rotation that changed recently (trades, call-ups,
    /// injury waves), in [0, 1]. `None` when no comparison was possible.
    #[serde(default)]
    pub home_instability: Option<f64>,
    #[serde(default)]
    pub away_instability: Option<f64>,
}

impl Default for GameContext {
    fn default() -> Self {
        Self {
            home_rest_days: 1,
            away_rest_days: 1,
            home_court_points: None,
            home_schedule: ScheduleLoad::default(),
            away_schedule: ScheduleLoad::default(),
            home_instability: None,
            away_instability: None,
        }
    }
}

impl GameContext {
    pub fn validate(&self) -> EngineResult<()> {
        if let Some(points) = self.home_court_points
            && !points.is_finite()
        {
            return Err(EngineError::InvalidContext {
                field: "home_court_points",
                value: points,
            });
        }
        for (field, km) in [
            ("home_schedule.travel_km", self.home_schedule.travel_km),
            ("away_schedule.travel_km", self.away_schedule.travel_km),
        ] {
            if !(km.is_finite() && km >= 0.0) {
                return Err(EngineError::InvalidContext { field, value: km });
            }
        }
        for (field, level) in [
            ("home_instability", self.home_instability),
            ("away_instability", self.away_instability),
        ] {
            if let Some(v) = level
                && !(0.0..=1.0).contains(&v)
            {
                return Err(EngineError::InvalidContext { field, value: v });
            }
        }
        Ok(())
    }
}

/// Everything `score_game` needs for one scheduled game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchup {
    pub home: TeamSnapshot,
    pub away: TeamSnapshot,
    #[serde(default)]
    pub home_roster: Vec<PlayerEntry>,
    #[serde(default)]
    pub away_roster: Vec<PlayerEntry>,
    #[serde(default)]
    pub context: GameContext,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_aliases_parse_case_insensitively() {
        assert_eq!(AvailabilityStatus::parse("OUT"), AvailabilityStatus::Out);
        assert_eq!(AvailabilityStatus::parse(" inactive "), AvailabilityStatus::Out);
        assert_eq!(AvailabilityStatus::parse("D"), AvailabilityStatus::Doubtful);
        assert_eq!(AvailabilityStatus::parse("GTD"), AvailabilityStatus::Questionable);
        assert_eq!(
            AvailabilityStatus::parse("Day-To-Day"),
            AvailabilityStatus::Questionable
        );
        assert_eq!(AvailabilityStatus::parse("likely"), AvailabilityStatus::Probable);
        assert_eq!(AvailabilityStatus::parse(""), AvailabilityStatus::Available);
        assert_eq!(AvailabilityStatus::parse("suspended?"), AvailabilityStatus::Available);
    }

    #[test]
    fn status_multipliers_match_table() {
        assert_eq!(AvailabilityStatus::Out.multiplier(), 0.0);
        assert_eq!(AvailabilityStatus::Doubtful.multiplier(), 0.25);
        assert_eq!(AvailabilityStatus::Questionable.multiplier(), 0.60);
        assert_eq!(AvailabilityStatus::Probable.multiplier(), 0.85);
        assert_eq!(AvailabilityStatus::Available.multiplier(), 1.0);
    }

    #[test]
    fn player_json_defaults_to_available() {
        let p: PlayerEntry = serde_json::from_str(r#"{"name":"A","ppg":20.0}"#).unwrap();
        assert_eq!(p.status, AvailabilityStatus::Available);
        let q: PlayerEntry =
            serde_json::from_str(r#"{"name":"B","status":"Game Time Decision"}"#).unwrap();
        assert_eq!(q.status, AvailabilityStatus::Questionable);
    }

    #[test]
    fn rejects_nan_and_negative_pace() {
        let nan = TeamSnapshot {
            net_rating: Some(f64::NAN),
            ..TeamSnapshot::empty("BOS")
        };
        assert!(matches!(
            nan.validate(),
            Err(EngineError::InvalidSnapshot { field: "net_rating", .. })
        ));

        let pace = TeamSnapshot {
            pace: Some(-1.0),
            ..TeamSnapshot::empty("BOS")
        };
        assert!(matches!(
            pace.validate(),
            Err(EngineError::InvalidSnapshot { field: "pace", .. })
        ));

        let negative_net = TeamSnapshot {
            net_rating: Some(-8.5),
            ..TeamSnapshot::empty("DET")
        };
        assert!(negative_net.validate().is_ok());
    }

    #[test]
    fn rejects_percentages_sent_as_fractions() {
        let efg = TeamSnapshot {
            efg_pct: Some(54.5),
            ..TeamSnapshot::empty("BOS")
        };
        assert!(matches!(
            efg.validate(),
            Err(EngineError::InvalidSnapshot { field: "efg_pct", .. })
        ));

        let opp = TeamSnapshot {
            opp_fg3_pct: Some(36.0),
            ..TeamSnapshot::empty("BOS")
        };
        assert!(matches!(
            opp.validate(),
            Err(EngineError::InvalidSnapshot { field: "opp_fg3_pct", .. })
        ));

        let reb = TeamSnapshot {
            reb_pct: Some(101.0),
            ..TeamSnapshot::empty("BOS")
        };
        assert!(reb.validate().is_err());

        let fine = TeamSnapshot {
            efg_pct: Some(1.0),
            reb_pct: Some(51.2),
            tov_pct: Some(13.0),
            ..TeamSnapshot::empty("BOS")
        };
        assert!(fine.validate().is_ok());
    }

    #[test]
    fn context_rejects_bad_travel_and_instability() {
        let mut ctx = GameContext::default();
        assert!(ctx.validate().is_ok());
        ctx.away_schedule.travel_km = -5.0;
        assert!(matches!(
            ctx.validate(),
            Err(EngineError::InvalidContext { field: "away_schedule.travel_km", .. })
        ));

        let ctx = GameContext {
            home_instability: Some(1.4),
            ..GameContext::default()
        };
        assert!(matches!(
            ctx.validate(),
            Err(EngineError::InvalidContext { field: "home_instability", .. })
        ));
    }

    #[test]
    fn context_json_defaults_schedule_and_instability() {
        let ctx: GameContext = serde_json::from_str(
            r#"{"home_rest_days": 0, "home_schedule": {"back_to_back": true, "travel_km": 1200.0}}"#,
        )
        .unwrap();
        assert!(ctx.home_schedule.back_to_back);
        assert!(!ctx.home_schedule.three_in_four);
        assert_eq!(ctx.away_schedule, ScheduleLoad::default());
        assert_eq!(ctx.away_rest_days, 1);
        assert_eq!(ctx.home_instability, None);
    }

    #[test]
    fn resolve_reports_defaulted_fields() {
        let snap = TeamSnapshot {
            net_rating: Some(3.0),
            pace: Some(99.0),
            ..TeamSnapshot::empty("NYK")
        };
        let (stats, defaulted) = snap.resolve(&LeagueParams::defaults());
        assert_eq!(stats.net_rating, 3.0);
        assert_eq!(stats.off_rating, 110.0);
        assert!(!defaulted.contains(&"net_rating"));
        assert!(defaulted.contains(&"off_rating"));
        assert_eq!(defaulted.len(), 12);
    }

    #[test]
    fn ppm_prefers_explicit_field() {
        let mut p = PlayerEntry::new("A", "BOS", 12.0, 2.0, 24.0);
        assert!((p.points_per_minute(32.0) - 0.5).abs() < 1e-12);
        p.ppm = Some(0.7);
        assert_eq!(p.points_per_minute(32.0), 0.7);
        p.ppm = None;
        p.mpg = None;
        assert!((p.points_per_minute(32.0) - 0.375).abs() < 1e-12);
    }
}
