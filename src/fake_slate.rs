//! Seeded synthetic slates for the bench, the dev binary and property tests.
//! The same seed always yields the same games.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::snapshot::{
    AvailabilityStatus, GameContext, Matchup, PlayerEntry, ScheduleLoad, TeamSnapshot,
};

const TEAMS: [&str; 30] = [
    "ATL", "BOS", "BKN", "CHA", "CHI", "CLE", "DAL", "DEN", "DET", "GSW", "HOU", "IND", "LAC",
    "LAL", "MEM", "MIA", "MIL", "MIN", "NOP", "NYK", "OKC", "ORL", "PHI", "PHX", "POR", "SAC",
    "SAS", "TOR", "UTA", "WAS",
];

const ROSTER_SIZE: usize = 10;

/// Knobs for how messy the generated data is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlateShape {
    /// Chance each optional team metric is left empty.
    pub missing_metric: f64,
    /// Chance a whole roster is missing.
    pub missing_roster: f64,
    /// Chance a player carries an injury designation.
    pub injury: f64,
    /// Chance a team arrives on a compressed schedule or with an unsettled
    /// rotation.
    pub schedule_stress: f64,
}

impl Default for SlateShape {
    fn default() -> Self {
        Self {
            missing_metric: 0.05,
            missing_roster: 0.02,
            injury: 0.12,
            schedule_stress: 0.15,
        }
    }
}

pub fn fake_slate(seed: u64, games: usize) -> Vec<Matchup> {
    fake_slate_with(seed, games, SlateShape::default())
}

pub fn fake_slate_with(seed: u64, games: usize, shape: SlateShape) -> Vec<Matchup> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..games)
        .map(|idx| {
            let home = TEAMS[(idx * 2) % TEAMS.len()];
            let away = TEAMS[(idx * 2 + 1) % TEAMS.len()];
            fake_matchup(&mut rng, home, away, shape)
        })
        .collect()
}

fn fake_matchup(rng: &mut StdRng, home: &str, away: &str, shape: SlateShape) -> Matchup {
    let home_roster = if rng.gen_bool(shape.missing_roster) {
        Vec::new()
    } else {
        fake_roster(rng, home, shape)
    };
    let away_roster = if rng.gen_bool(shape.missing_roster) {
        Vec::new()
    } else {
        fake_roster(rng, away, shape)
    };
    let home_court_points = match rng.gen_range(0..20) {
        0 => Some(0.0),
        1 => Some(rng.gen_range(1.0..4.0)),
        _ => None,
    };
    Matchup {
        home: fake_team(rng, home, shape),
        away: fake_team(rng, away, shape),
        home_roster,
        away_roster,
        context: GameContext {
            home_rest_days: rng.gen_range(0..5),
            away_rest_days: rng.gen_range(0..5),
            home_court_points,
            home_schedule: fake_schedule(rng, shape, false),
            away_schedule: fake_schedule(rng, shape, true),
            home_instability: fake_instability(rng, shape),
            away_instability: fake_instability(rng, shape),
        },
    }
}

fn fake_schedule(rng: &mut StdRng, shape: SlateShape, travelling: bool) -> ScheduleLoad {
    let travel_km = if travelling { rng.gen_range(0.0..4000.0) } else { 0.0 };
    if !rng.gen_bool(shape.schedule_stress) {
        return ScheduleLoad {
            travel_km,
            ..ScheduleLoad::default()
        };
    }
    let three_in_four = rng.gen_bool(0.5);
    ScheduleLoad {
        back_to_back: rng.gen_bool(0.6),
        three_in_four,
        four_in_five: three_in_four && rng.gen_bool(0.3),
        travel_km,
    }
}

fn fake_instability(rng: &mut StdRng, shape: SlateShape) -> Option<f64> {
    rng.gen_bool(shape.schedule_stress).then(|| rng.gen_range(0.0..0.6))
}

fn maybe(
    rng: &mut StdRng,
    shape: SlateShape,
    draw: impl FnOnce(&mut StdRng) -> f64,
) -> Option<f64> {
    let value = draw(rng);
    if rng.gen_bool(shape.missing_metric) {
        None
    } else {
        Some(value)
    }
}

pub fn fake_team(rng: &mut StdRng, team: &str, shape: SlateShape) -> TeamSnapshot {
    let net = rng.gen_range(-12.0..12.0);
    let off = rng.gen_range(106.0..122.0);
    let clutch = if rng.gen_bool(0.5) {
        Some(rng.gen_range(-15.0..15.0))
    } else {
        None
    };
    TeamSnapshot {
        team: team.to_string(),
        net_rating: maybe(rng, shape, |_| net),
        off_rating: maybe(rng, shape, |_| off),
        def_rating: maybe(rng, shape, |_| off - net),
        pace: maybe(rng, shape, |r| r.gen_range(95.0..104.0)),
        reb_pct: maybe(rng, shape, |r| r.gen_range(46.0..54.0)),
        tov_pct: maybe(rng, shape, |r| r.gen_range(11.0..17.0)),
        efg_pct: maybe(rng, shape, |r| r.gen_range(0.49..0.59)),
        fg3_pct: maybe(rng, shape, |r| r.gen_range(0.32..0.40)),
        fg3a_rate: maybe(rng, shape, |r| r.gen_range(0.33..0.50)),
        ft_rate: maybe(rng, shape, |r| r.gen_range(0.18..0.32)),
        opp_fg3_pct: maybe(rng, shape, |r| r.gen_range(0.33..0.39)),
        home_road_split: maybe(rng, shape, |r| r.gen_range(-4.0..9.0)),
        bench_share: maybe(rng, shape, |r| r.gen_range(0.22..0.42)),
        clutch_net_rating: clutch,
        fouls_per_game: maybe(rng, shape, |r| r.gen_range(16.0..23.0)),
    }
}

fn fake_status(rng: &mut StdRng, shape: SlateShape) -> AvailabilityStatus {
    if !rng.gen_bool(shape.injury) {
        return AvailabilityStatus::Available;
    }
    match rng.gen_range(0..4) {
        0 => AvailabilityStatus::Out,
        1 => AvailabilityStatus::Doubtful,
        2 => AvailabilityStatus::Questionable,
        _ => AvailabilityStatus::Probable,
    }
}

pub fn fake_roster(rng: &mut StdRng, team: &str, shape: SlateShape) -> Vec<PlayerEntry> {
    (0..ROSTER_SIZE)
        .map(|slot| {
            // Earlier slots play more and score more.
            let depth = slot as f64 / ROSTER_SIZE as f64;
            let mpg = (36.0 - 28.0 * depth + rng.gen_range(-3.0..3.0)).max(4.0);
            let ppg = (mpg * rng.gen_range(0.35..0.85)).max(0.0);
            let apg = rng.gen_range(0.3..8.0) * (1.0 - depth);
            let mut player = PlayerEntry::new(&format!("{team} Player {}", slot + 1), team, ppg, apg, mpg)
                .with_status(fake_status(rng, shape));
            if player.status.is_absence() && rng.gen_bool(0.3) {
                player.games_missed = Some(rng.gen_range(1..25));
                if rng.gen_bool(0.5) {
                    player.priced_in = Some(rng.gen_bool(0.7));
                }
            }
            player
        })
        .collect()
}
