//! The factor library. Every factor is a pure function of the resolved team
//! stats, the game context and the resolved availability, returning a signed
//! value in [-1, 1] (+1 = full home advantage).

use serde::{Deserialize, Serialize};

use crate::availability::ResolvedAvailability;
use crate::league_params::LeagueParams;
use crate::rotation::RotationOutcome;
use crate::schedule::schedule_stress;
use crate::signal::{clamp_unit, inverse_diff, pct_point_diff, scaled, scaled_diff};
use crate::snapshot::{GameContext, ScheduleLoad, TeamStats};
use crate::star_impact;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    NetRating,
    StarImpact,
    RotationReplacement,
    OffVsDef,
    TurnoverDiff,
    ShootingEfficiency,
    ShotQuality,
    ThreePointEdge,
    FreeThrowRate,
    Rebounding,
    HomeRoadSplit,
    HomeCourt,
    RestFatigue,
    RimProtection,
    PerimeterDefense,
    MatchupFit,
    BenchDepth,
    PaceControl,
    LateGameCreation,
    FoulTroubleRisk,
    ShootingVariance,
    Coaching,
    Motivation,
}

impl FactorKind {
    pub const ALL: [FactorKind; 23] = [
        FactorKind::NetRating,
        FactorKind::StarImpact,
        FactorKind::RotationReplacement,
        FactorKind::OffVsDef,
        FactorKind::TurnoverDiff,
        FactorKind::ShootingEfficiency,
        FactorKind::ShotQuality,
        FactorKind::ThreePointEdge,
        FactorKind::FreeThrowRate,
        FactorKind::Rebounding,
        FactorKind::HomeRoadSplit,
        FactorKind::HomeCourt,
        FactorKind::RestFatigue,
        FactorKind::RimProtection,
        FactorKind::PerimeterDefense,
        FactorKind::MatchupFit,
        FactorKind::BenchDepth,
        FactorKind::PaceControl,
        FactorKind::LateGameCreation,
        FactorKind::FoulTroubleRisk,
        FactorKind::ShootingVariance,
        FactorKind::Coaching,
        FactorKind::Motivation,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FactorKind::NetRating => "net_rating",
            FactorKind::StarImpact => "star_impact",
            FactorKind::RotationReplacement => "rotation_replacement",
            FactorKind::OffVsDef => "off_vs_def",
            FactorKind::TurnoverDiff => "turnover_diff",
            FactorKind::ShootingEfficiency => "shooting_efficiency",
            FactorKind::ShotQuality => "shot_quality",
            FactorKind::ThreePointEdge => "three_point_edge",
            FactorKind::FreeThrowRate => "free_throw_rate",
            FactorKind::Rebounding => "rebounding",
            FactorKind::HomeRoadSplit => "home_road_split",
            FactorKind::HomeCourt => "home_court",
            FactorKind::RestFatigue => "rest_fatigue",
            FactorKind::RimProtection => "rim_protection",
            FactorKind::PerimeterDefense => "perimeter_defense",
            FactorKind::MatchupFit => "matchup_fit",
            FactorKind::BenchDepth => "bench_depth",
            FactorKind::PaceControl => "pace_control",
            FactorKind::LateGameCreation => "late_game_creation",
            FactorKind::FoulTroubleRisk => "foul_trouble_risk",
            FactorKind::ShootingVariance => "shooting_variance",
            FactorKind::Coaching => "coaching",
            FactorKind::Motivation => "motivation",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            FactorKind::NetRating => "Net Rating",
            FactorKind::StarImpact => "Star Impact",
            FactorKind::RotationReplacement => "Rotation Replacement",
            FactorKind::OffVsDef => "Off vs Def Efficiency",
            FactorKind::TurnoverDiff => "Turnover Differential",
            FactorKind::ShootingEfficiency => "Shooting Efficiency",
            FactorKind::ShotQuality => "Shot Quality",
            FactorKind::ThreePointEdge => "3P Edge",
            FactorKind::FreeThrowRate => "Free Throw Rate",
            FactorKind::Rebounding => "Rebounding",
            FactorKind::HomeRoadSplit => "Home/Road Split",
            FactorKind::HomeCourt => "Home Court",
            FactorKind::RestFatigue => "Rest/Fatigue",
            FactorKind::RimProtection => "Rim Protection",
            FactorKind::PerimeterDefense => "Perimeter Defense",
            FactorKind::MatchupFit => "Matchup Fit",
            FactorKind::BenchDepth => "Bench Depth",
            FactorKind::PaceControl => "Pace Control",
            FactorKind::LateGameCreation => "Late Game Creation",
            FactorKind::FoulTroubleRisk => "Foul Trouble Risk",
            FactorKind::ShootingVariance => "Shooting Variance",
            FactorKind::Coaching => "Coaching",
            FactorKind::Motivation => "Motivation",
        }
    }

    /// Snapshot, context and availability fields the factor reads.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            FactorKind::NetRating => &["net_rating"],
            FactorKind::StarImpact => &["roster.ppg", "roster.apg", "roster.mpg", "roster.status"],
            FactorKind::RotationReplacement => {
                &["roster.ppg", "roster.mpg", "roster.ppm", "roster.status"]
            }
            FactorKind::OffVsDef => &["off_rating", "def_rating"],
            FactorKind::TurnoverDiff => &["tov_pct"],
            FactorKind::ShootingEfficiency => &["efg_pct", "fg3_pct", "fg3a_rate"],
            FactorKind::ShotQuality => &["efg_pct"],
            FactorKind::ThreePointEdge => &["fg3_pct", "fg3a_rate"],
            FactorKind::FreeThrowRate => &["ft_rate"],
            FactorKind::Rebounding => &["reb_pct"],
            FactorKind::HomeRoadSplit => &["home_road_split"],
            FactorKind::HomeCourt => &["context.home_court_points"],
            FactorKind::RestFatigue => &[
                "context.home_rest_days",
                "context.away_rest_days",
                "context.home_schedule",
                "context.away_schedule",
            ],
            FactorKind::RimProtection => &["def_rating"],
            FactorKind::PerimeterDefense => &["opp_fg3_pct"],
            FactorKind::MatchupFit => &["reb_pct", "fg3a_rate"],
            FactorKind::BenchDepth => &["bench_share"],
            FactorKind::PaceControl => &["pace"],
            FactorKind::LateGameCreation => &["clutch_net_rating", "off_rating"],
            FactorKind::FoulTroubleRisk => &["fouls_per_game"],
            FactorKind::ShootingVariance => &["fg3a_rate"],
            FactorKind::Coaching | FactorKind::Motivation => &[],
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        FactorKind::ALL.into_iter().find(|k| k.key() == key)
    }

    /// Always neutral until a data source exists.
    pub fn is_placeholder(self) -> bool {
        matches!(self, FactorKind::Coaching | FactorKind::Motivation)
    }

    /// Whether a strong reading may confirm a confident pick.
    pub fn can_confirm(self) -> bool {
        !self.is_placeholder()
    }
}

/// Everything a factor may read for one game.
#[derive(Debug, Clone, Copy)]
pub struct FactorInput<'a> {
    pub home: &'a TeamStats,
    pub away: &'a TeamStats,
    pub context: &'a GameContext,
    pub availability: &'a ResolvedAvailability,
    pub rotation: &'a RotationOutcome,
    pub params: &'a LeagueParams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorResult {
    pub kind: FactorKind,
    pub name: String,
    pub weight: u32,
    pub signed_value: f64,
    pub contribution: f64,
    pub inputs_used: String,
}

impl FactorResult {
    pub fn new(kind: FactorKind, weight: u32, signed_value: f64, inputs_used: String) -> Self {
        let signed_value = clamp_unit(signed_value);
        Self {
            kind,
            name: kind.display_name().to_string(),
            weight,
            signed_value,
            contribution: weight as f64 * signed_value,
            inputs_used,
        }
    }
}

fn shot_quality(h: &TeamStats, a: &TeamStats, p: &LeagueParams) -> f64 {
    pct_point_diff(h.efg_pct, a.efg_pct, p.scales.shot_quality)
}

fn three_point_score(t: &TeamStats) -> f64 {
    t.fg3_pct * 100.0 + t.fg3a_rate * 20.0
}

fn three_point_edge(h: &TeamStats, a: &TeamStats, p: &LeagueParams) -> f64 {
    scaled_diff(three_point_score(h), three_point_score(a), p.scales.three_point)
}

/// Capped rest days less the rest a stressful schedule costs.
fn effective_rest(days: u32, load: &ScheduleLoad, p: &LeagueParams) -> f64 {
    days.min(p.max_rest_days) as f64 - schedule_stress(load, p) * p.stress.rest_days_penalty
}

/// Signed value for one factor. `weight` is only read by rotation
/// replacement, whose value depends on it to honour the point ceiling.
pub fn evaluate(kind: FactorKind, weight: u32, input: &FactorInput<'_>) -> f64 {
    let (h, a, p) = (input.home, input.away, input.params);
    let s = &p.scales;
    let value = match kind {
        FactorKind::NetRating => scaled_diff(h.net_rating, a.net_rating, s.net_rating),
        FactorKind::StarImpact => star_impact::star_impact_value(input.availability),
        FactorKind::RotationReplacement => input.rotation.signed_value(weight),
        FactorKind::OffVsDef => {
            let home_edge = h.off_rating - a.def_rating;
            let away_edge = a.off_rating - h.def_rating;
            scaled(home_edge - away_edge, s.off_vs_def)
        }
        FactorKind::TurnoverDiff => inverse_diff(h.tov_pct, a.tov_pct, s.turnover),
        FactorKind::ShootingEfficiency => (shot_quality(h, a, p) + three_point_edge(h, a, p)) / 2.0,
        FactorKind::ShotQuality => shot_quality(h, a, p),
        FactorKind::ThreePointEdge => three_point_edge(h, a, p),
        FactorKind::FreeThrowRate => scaled_diff(h.ft_rate, a.ft_rate, s.ft_rate),
        FactorKind::Rebounding => scaled_diff(h.reb_pct, a.reb_pct, s.rebounding),
        FactorKind::HomeRoadSplit => {
            let excess = (h.home_road_split + a.home_road_split) / 2.0 - p.typical_home_road_split;
            scaled(excess, s.home_road_split)
        }
        FactorKind::HomeCourt => {
            let points = input
                .context
                .home_court_points
                .unwrap_or(p.home_court_full_points);
            scaled(points, p.home_court_full_points)
        }
        FactorKind::RestFatigue => {
            let ctx = input.context;
            scaled_diff(
                effective_rest(ctx.home_rest_days, &ctx.home_schedule, p),
                effective_rest(ctx.away_rest_days, &ctx.away_schedule, p),
                s.rest,
            )
        }
        FactorKind::RimProtection => inverse_diff(h.def_rating, a.def_rating, s.rim),
        FactorKind::PerimeterDefense => {
            pct_point_diff(a.opp_fg3_pct, h.opp_fg3_pct, s.perimeter)
        }
        FactorKind::MatchupFit => scaled_diff(
            h.reb_pct * a.fg3a_rate,
            a.reb_pct * h.fg3a_rate,
            s.matchup,
        ),
        FactorKind::BenchDepth => scaled_diff(h.bench_share, a.bench_share, s.bench_share),
        FactorKind::PaceControl => scaled_diff(h.pace, a.pace, s.pace),
        FactorKind::LateGameCreation => match (h.clutch_net_rating, a.clutch_net_rating) {
            (Some(hc), Some(ac)) => scaled_diff(hc, ac, s.clutch),
            _ => scaled((h.off_rating - a.off_rating) * 0.5, s.clutch),
        },
        FactorKind::FoulTroubleRisk => inverse_diff(h.fouls_per_game, a.fouls_per_game, s.fouls),
        FactorKind::ShootingVariance => inverse_diff(h.fg3a_rate, a.fg3a_rate, s.variance),
        FactorKind::Coaching | FactorKind::Motivation => 0.0,
    };
    clamp_unit(value)
}

/// Human-readable inputs line for the explainer.
pub fn describe(kind: FactorKind, input: &FactorInput<'_>) -> String {
    let (h, a) = (input.home, input.away);
    match kind {
        FactorKind::NetRating => format!("HomeNet:{:+.1} AwayNet:{:+.1}", h.net_rating, a.net_rating),
        FactorKind::StarImpact => star_impact::describe(input.availability),
        FactorKind::RotationReplacement => input.rotation.describe(),
        FactorKind::OffVsDef => format!(
            "HomeOff:{:.1} AwayDef:{:.1} AwayOff:{:.1} HomeDef:{:.1}",
            h.off_rating, a.def_rating, a.off_rating, h.def_rating
        ),
        FactorKind::TurnoverDiff => format!("HomeTOV:{:.1} AwayTOV:{:.1}", h.tov_pct, a.tov_pct),
        FactorKind::ShootingEfficiency => format!(
            "HomeEFG:{:.3} AwayEFG:{:.3} Home3P:{:.3}@{:.2} Away3P:{:.3}@{:.2}",
            h.efg_pct, a.efg_pct, h.fg3_pct, h.fg3a_rate, a.fg3_pct, a.fg3a_rate
        ),
        FactorKind::ShotQuality => format!("HomeEFG:{:.3} AwayEFG:{:.3}", h.efg_pct, a.efg_pct),
        FactorKind::ThreePointEdge => format!(
            "Home3P:{:.3}@{:.2} Away3P:{:.3}@{:.2}",
            h.fg3_pct, h.fg3a_rate, a.fg3_pct, a.fg3a_rate
        ),
        FactorKind::FreeThrowRate => format!("HomeFTr:{:.3} AwayFTr:{:.3}", h.ft_rate, a.ft_rate),
        FactorKind::Rebounding => format!("HomeREB:{:.1} AwayREB:{:.1}", h.reb_pct, a.reb_pct),
        FactorKind::HomeRoadSplit => format!(
            "HomeSplit:{:+.1} AwaySplit:{:+.1} Typical:{:+.1}",
            h.home_road_split, a.home_road_split, input.params.typical_home_road_split
        ),
        FactorKind::HomeCourt => match input.context.home_court_points {
            Some(points) if points == 0.0 => "neutral site".to_string(),
            Some(points) => format!("override {points:.1} pts"),
            None => format!("standard {:.1} pts", input.params.home_court_full_points),
        },
        FactorKind::RestFatigue => {
            let ctx = input.context;
            format!(
                "HomeRest:{}d AwayRest:{}d HomeStress:{:.2} AwayStress:{:.2}",
                ctx.home_rest_days,
                ctx.away_rest_days,
                schedule_stress(&ctx.home_schedule, input.params),
                schedule_stress(&ctx.away_schedule, input.params)
            )
        }
        FactorKind::RimProtection => format!("HomeDef:{:.1} AwayDef:{:.1}", h.def_rating, a.def_rating),
        FactorKind::PerimeterDefense => format!(
            "HomeOpp3P:{:.3} AwayOpp3P:{:.3}",
            h.opp_fg3_pct, a.opp_fg3_pct
        ),
        FactorKind::MatchupFit => format!(
            "HomeREB:{:.1} Away3PAr:{:.2} AwayREB:{:.1} Home3PAr:{:.2}",
            h.reb_pct, a.fg3a_rate, a.reb_pct, h.fg3a_rate
        ),
        FactorKind::BenchDepth => format!(
            "HomeBench:{:.2} AwayBench:{:.2}",
            h.bench_share, a.bench_share
        ),
        FactorKind::PaceControl => format!("HomePace:{:.1} AwayPace:{:.1}", h.pace, a.pace),
        FactorKind::LateGameCreation => match (h.clutch_net_rating, a.clutch_net_rating) {
            (Some(hc), Some(ac)) => format!("HomeClutch:{hc:+.1} AwayClutch:{ac:+.1}"),
            _ => "off rating proxy".to_string(),
        },
        FactorKind::FoulTroubleRisk => format!(
            "HomePF:{:.1} AwayPF:{:.1}",
            h.fouls_per_game, a.fouls_per_game
        ),
        FactorKind::ShootingVariance => format!(
            "Home3PAr:{:.2} Away3PAr:{:.2}",
            h.fg3a_rate, a.fg3a_rate
        ),
        FactorKind::Coaching | FactorKind::Motivation => "placeholder".to_string(),
    }
}

/// Evaluate one factor into a result row.
pub fn score_factor(kind: FactorKind, weight: u32, input: &FactorInput<'_>) -> FactorResult {
    let result = FactorResult::new(kind, weight, evaluate(kind, weight, input), describe(kind, input));
    tracing::debug!(
        factor = kind.key(),
        signed = result.signed_value,
        contribution = result.contribution,
        inputs = %result.inputs_used,
        "factor scored"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::resolve;
    use crate::snapshot::TeamSnapshot;

    struct Fixture {
        home: TeamStats,
        away: TeamStats,
        context: GameContext,
        availability: ResolvedAvailability,
        rotation: RotationOutcome,
        params: LeagueParams,
    }

    impl Fixture {
        fn new(home: TeamSnapshot, away: TeamSnapshot) -> Self {
            let params = LeagueParams::defaults();
            let (home, _) = home.resolve(&params);
            let (away, _) = away.resolve(&params);
            Self {
                home,
                away,
                context: GameContext::default(),
                availability: resolve("H", "A", &[], &[], (true, true), &params),
                rotation: RotationOutcome::inactive(),
                params,
            }
        }

        fn input(&self) -> FactorInput<'_> {
            FactorInput {
                home: &self.home,
                away: &self.away,
                context: &self.context,
                availability: &self.availability,
                rotation: &self.rotation,
                params: &self.params,
            }
        }

        fn eval(&self, kind: FactorKind) -> f64 {
            evaluate(kind, 5, &self.input())
        }
    }

    #[test]
    fn keys_round_trip_and_are_unique() {
        for kind in FactorKind::ALL {
            assert_eq!(FactorKind::from_key(kind.key()), Some(kind));
        }
        let mut keys: Vec<&str> = FactorKind::ALL.iter().map(|k| k.key()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), FactorKind::ALL.len());
        assert_eq!(FactorKind::from_key("bogus"), None);
    }

    #[test]
    fn neutral_inputs_only_move_home_court() {
        let fx = Fixture::new(TeamSnapshot::empty("H"), TeamSnapshot::empty("A"));
        for kind in FactorKind::ALL {
            let v = fx.eval(kind);
            if kind == FactorKind::HomeCourt {
                assert_eq!(v, 1.0);
            } else {
                assert_eq!(v, 0.0, "{}", kind.key());
            }
        }
    }

    #[test]
    fn net_rating_scales_and_saturates() {
        let fx = Fixture::new(
            TeamSnapshot {
                net_rating: Some(5.0),
                ..TeamSnapshot::empty("H")
            },
            TeamSnapshot {
                net_rating: Some(-2.0),
                ..TeamSnapshot::empty("A")
            },
        );
        assert!((fx.eval(FactorKind::NetRating) - 0.7).abs() < 1e-12);

        let fx = Fixture::new(
            TeamSnapshot {
                net_rating: Some(25.0),
                ..TeamSnapshot::empty("H")
            },
            TeamSnapshot::empty("A"),
        );
        assert_eq!(fx.eval(FactorKind::NetRating), 1.0);
    }

    #[test]
    fn lower_is_better_factors_point_home_when_home_is_lower() {
        let fx = Fixture::new(
            TeamSnapshot {
                tov_pct: Some(12.0),
                def_rating: Some(108.0),
                opp_fg3_pct: Some(0.34),
                fouls_per_game: Some(18.0),
                fg3a_rate: Some(0.35),
                ..TeamSnapshot::empty("H")
            },
            TeamSnapshot {
                tov_pct: Some(15.0),
                def_rating: Some(114.0),
                opp_fg3_pct: Some(0.38),
                fouls_per_game: Some(22.0),
                fg3a_rate: Some(0.45),
                ..TeamSnapshot::empty("A")
            },
        );
        for kind in [
            FactorKind::TurnoverDiff,
            FactorKind::RimProtection,
            FactorKind::PerimeterDefense,
            FactorKind::FoulTroubleRisk,
            FactorKind::ShootingVariance,
        ] {
            assert!(fx.eval(kind) > 0.0, "{}", kind.key());
        }
    }

    #[test]
    fn home_court_override_and_neutral_site() {
        let mut fx = Fixture::new(TeamSnapshot::empty("H"), TeamSnapshot::empty("A"));
        fx.context.home_court_points = Some(0.0);
        assert_eq!(fx.eval(FactorKind::HomeCourt), 0.0);
        assert_eq!(describe(FactorKind::HomeCourt, &fx.input()), "neutral site");
        fx.context.home_court_points = Some(1.5);
        assert!((fx.eval(FactorKind::HomeCourt) - 0.5).abs() < 1e-12);
        fx.context.home_court_points = Some(9.0);
        assert_eq!(fx.eval(FactorKind::HomeCourt), 1.0);
    }

    #[test]
    fn rest_is_capped() {
        let mut fx = Fixture::new(TeamSnapshot::empty("H"), TeamSnapshot::empty("A"));
        fx.context.home_rest_days = 10;
        fx.context.away_rest_days = 3;
        // min(10, 4) - 3 over a two-day scale.
        assert!((fx.eval(FactorKind::RestFatigue) - 0.5).abs() < 1e-12);
        fx.context.away_rest_days = 0;
        assert_eq!(fx.eval(FactorKind::RestFatigue), 1.0);
    }

    #[test]
    fn schedule_stress_costs_rest() {
        let mut fx = Fixture::new(TeamSnapshot::empty("H"), TeamSnapshot::empty("A"));
        assert_eq!(fx.eval(FactorKind::RestFatigue), 0.0);

        // Fully stressed away team loses one rest day against a two-day scale.
        fx.context.away_schedule = ScheduleLoad {
            back_to_back: true,
            three_in_four: true,
            four_in_five: true,
            travel_km: 5000.0,
        };
        assert!((fx.eval(FactorKind::RestFatigue) - 0.5).abs() < 1e-12);
        let line = describe(FactorKind::RestFatigue, &fx.input());
        assert!(line.ends_with("HomeStress:0.00 AwayStress:1.00"), "{line}");

        fx.context.home_schedule = fx.context.away_schedule;
        assert_eq!(fx.eval(FactorKind::RestFatigue), 0.0);
    }

    #[test]
    fn matchup_fit_line_shows_its_inputs() {
        let fx = Fixture::new(
            TeamSnapshot {
                reb_pct: Some(52.5),
                fg3a_rate: Some(0.38),
                ..TeamSnapshot::empty("H")
            },
            TeamSnapshot {
                reb_pct: Some(48.0),
                fg3a_rate: Some(0.45),
                ..TeamSnapshot::empty("A")
            },
        );
        assert_eq!(
            describe(FactorKind::MatchupFit, &fx.input()),
            "HomeREB:52.5 Away3PAr:0.45 AwayREB:48.0 Home3PAr:0.38"
        );
        assert!(fx.eval(FactorKind::MatchupFit) > 0.0);
    }

    #[test]
    fn clutch_uses_real_rating_when_both_present() {
        let fx = Fixture::new(
            TeamSnapshot {
                clutch_net_rating: Some(4.0),
                off_rating: Some(100.0),
                ..TeamSnapshot::empty("H")
            },
            TeamSnapshot {
                clutch_net_rating: Some(-1.0),
                ..TeamSnapshot::empty("A")
            },
        );
        assert_eq!(fx.eval(FactorKind::LateGameCreation), 1.0);

        let proxy = Fixture::new(
            TeamSnapshot {
                clutch_net_rating: Some(4.0),
                off_rating: Some(114.0),
                ..TeamSnapshot::empty("H")
            },
            TeamSnapshot::empty("A"),
        );
        assert!((proxy.eval(FactorKind::LateGameCreation) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn home_road_split_measures_excess_over_typical() {
        let fx = Fixture::new(
            TeamSnapshot {
                home_road_split: Some(8.0),
                ..TeamSnapshot::empty("H")
            },
            TeamSnapshot {
                home_road_split: Some(2.0),
                ..TeamSnapshot::empty("A")
            },
        );
        // (8 + 2) / 2 - 2 = 3 over a 6 point scale.
        assert!((fx.eval(FactorKind::HomeRoadSplit) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn placeholders_are_always_neutral() {
        let fx = Fixture::new(
            TeamSnapshot {
                net_rating: Some(12.0),
                ..TeamSnapshot::empty("H")
            },
            TeamSnapshot::empty("A"),
        );
        assert_eq!(fx.eval(FactorKind::Coaching), 0.0);
        assert_eq!(fx.eval(FactorKind::Motivation), 0.0);
        assert!(!FactorKind::Coaching.can_confirm());
        assert!(!FactorKind::Motivation.can_confirm());
        assert!(FactorKind::HomeCourt.can_confirm());
        assert!(FactorKind::NetRating.can_confirm());
    }
}
