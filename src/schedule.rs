//! Schedule helpers: rest days and schedule stress from game dates, and the
//! stress score the rest/fatigue factor and the confidence bucket read.
//! Rest days count full off days: a back-to-back has 0, playing every other
//! day has 1.

use chrono::NaiveDate;

use crate::league_params::LeagueParams;
use crate::snapshot::{GameContext, ScheduleLoad};

/// Accepts `2025-01-14`, `20250114` or anything else with exactly eight digits.
pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 8 {
        NaiveDate::parse_from_str(&digits, "%Y%m%d").ok()
    } else {
        None
    }
}

/// Off days between the previous game and this one, capped at the league
/// maximum. No previous game (season opener) counts as fully rested; a
/// previous date on or after the game date is treated as a back-to-back.
pub fn rest_days(last_game: Option<NaiveDate>, game_date: NaiveDate, params: &LeagueParams) -> u32 {
    let Some(last) = last_game else {
        return params.max_rest_days;
    };
    let gap = (game_date - last).num_days() - 1;
    gap.clamp(0, params.max_rest_days as i64) as u32
}

pub fn is_back_to_back(last_game: Option<NaiveDate>, game_date: NaiveDate) -> bool {
    last_game.is_some_and(|last| (game_date - last).num_days() <= 1)
}

/// Games played in the `window_days` days before `game_date`, not counting it.
pub fn games_in_window(played: &[NaiveDate], game_date: NaiveDate, window_days: i64) -> usize {
    played
        .iter()
        .filter(|d| {
            let back = (game_date - **d).num_days();
            back >= 1 && back <= window_days
        })
        .count()
}

/// Third game in four nights: two games already in the previous three days.
pub fn is_three_in_four(played: &[NaiveDate], game_date: NaiveDate) -> bool {
    games_in_window(played, game_date, 3) >= 2
}

/// Fourth game in five nights: three games already in the previous four days.
pub fn is_four_in_five(played: &[NaiveDate], game_date: NaiveDate) -> bool {
    games_in_window(played, game_date, 4) >= 3
}

/// Latest game strictly before `game_date`.
pub fn last_game_before(played: &[NaiveDate], game_date: NaiveDate) -> Option<NaiveDate> {
    played.iter().copied().filter(|d| *d < game_date).max()
}

pub fn schedule_load(played: &[NaiveDate], game_date: NaiveDate, travel_km: f64) -> ScheduleLoad {
    ScheduleLoad {
        back_to_back: is_back_to_back(last_game_before(played, game_date), game_date),
        three_in_four: is_three_in_four(played, game_date),
        four_in_five: is_four_in_five(played, game_date),
        travel_km,
    }
}

/// Schedule stress in [0, 1]: back-to-back, 3-in-4, 4-in-5 and travel
/// components summed, capped, then normalised.
pub fn schedule_stress(load: &ScheduleLoad, params: &LeagueParams) -> f64 {
    let s = &params.stress;
    let mut raw = 0.0;
    if load.back_to_back {
        raw += s.back_to_back;
    }
    if load.three_in_four {
        raw += s.three_in_four;
    }
    if load.four_in_five {
        raw += s.four_in_five;
    }
    if load.travel_km.is_finite() && load.travel_km > 0.0 {
        raw += (load.travel_km / s.travel_full_km).min(1.0) * s.travel;
    }
    (raw.min(s.max_raw) / s.max_raw).clamp(0.0, 1.0)
}

/// Context for a regular home game from each team's recent game dates and
/// the distance each travelled since its last game.
pub fn context_from_schedule(
    home_played: &[NaiveDate],
    away_played: &[NaiveDate],
    game_date: NaiveDate,
    travel_km: (f64, f64),
    params: &LeagueParams,
) -> GameContext {
    GameContext {
        home_rest_days: rest_days(last_game_before(home_played, game_date), game_date, params),
        away_rest_days: rest_days(last_game_before(away_played, game_date), game_date, params),
        home_schedule: schedule_load(home_played, game_date, travel_km.0),
        away_schedule: schedule_load(away_played, game_date, travel_km.1),
        ..GameContext::default()
    }
}
