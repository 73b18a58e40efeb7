//! Merges per-player availability into star multipliers for each team.
//!
//! A star's effective points are `base - base * (1 - multiplier) * dampener`:
//! the dampener shrinks only the *loss*, so an absence the net rating has
//! already absorbed is not charged twice. Empty tier slots count as fully
//! available.

use serde::{Deserialize, Serialize};

use crate::league_params::LeagueParams;
use crate::player_impact::{STAR_POOL_POINTS, StarTiers, Tier, select_star_tiers};
use crate::snapshot::{AvailabilityStatus, PlayerEntry};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarAvailability {
    pub name: String,
    /// Position in the team's roster slice.
    pub roster_index: usize,
    pub tier: Tier,
    pub impact: f64,
    pub status: AvailabilityStatus,
    pub multiplier: f64,
    /// 1.0 when the absence is treated as new information.
    pub dampener: f64,
    pub effective_points: f64,
}

impl StarAvailability {
    pub fn base_points(&self) -> f64 {
        self.tier.base_points()
    }

    /// Star points charged against the team after dampening.
    pub fn lost_points(&self) -> f64 {
        self.base_points() - self.effective_points
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamAvailability {
    pub team: String,
    pub stars: Vec<StarAvailability>,
    /// Sum of effective star points, empty slots filled at full value.
    pub star_points: f64,
    pub neutral_slots: usize,
    pub usable_players: usize,
}

impl TeamAvailability {
    /// No Tier A could be identified, so availability contributes nothing.
    pub fn is_neutral(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn is_star(&self, roster_index: usize) -> bool {
        self.stars.iter().any(|s| s.roster_index == roster_index)
    }

    pub fn absent_stars(&self) -> impl Iterator<Item = &StarAvailability> {
        self.stars.iter().filter(|s| s.status.is_absence())
    }

    pub fn has_star_absence(&self) -> bool {
        self.absent_stars().next().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAvailability {
    pub home: TeamAvailability,
    pub away: TeamAvailability,
}

/// Double-count dampener for one star.
///
/// An explicit `priced_in = false` wins. A games-missed count at or past the
/// established sample grades from the top of the dampener range down to the
/// bottom at twice the sample. A bare `priced_in = true` flag uses the
/// midpoint. Anything else is treated as new information. When the team's net
/// rating is unknown nothing can be priced into it.
pub fn dampener(player: &PlayerEntry, net_rating_known: bool, params: &LeagueParams) -> f64 {
    if !net_rating_known || player.status.multiplier() >= 1.0 {
        return 1.0;
    }
    let established = params.established_absence_games.max(1);
    match (player.priced_in, player.games_missed) {
        (Some(false), _) => 1.0,
        (_, Some(games)) if games >= established => {
            let extra = (games - established) as f64 / established as f64;
            let span = params.dampener_max - params.dampener_min;
            params.dampener_max - span * extra.min(1.0)
        }
        (Some(true), Some(_)) => params.dampener_max,
        (Some(true), None) => params.dampener_midpoint(),
        _ => 1.0,
    }
}

fn star_availability(
    roster: &[PlayerEntry],
    star: &crate::player_impact::RankedStar,
    net_rating_known: bool,
    params: &LeagueParams,
) -> StarAvailability {
    let player = &roster[star.index];
    let multiplier = player.status.multiplier();
    let damp = dampener(player, net_rating_known, params);
    let base = star.tier.base_points();
    StarAvailability {
        name: player.name.clone(),
        roster_index: star.index,
        tier: star.tier,
        impact: star.impact,
        status: player.status,
        multiplier,
        dampener: damp,
        effective_points: base - base * (1.0 - multiplier) * damp,
    }
}

pub fn resolve_team(
    team: &str,
    roster: &[PlayerEntry],
    net_rating_known: bool,
    params: &LeagueParams,
) -> TeamAvailability {
    let tiers: StarTiers = select_star_tiers(roster, params);
    let stars: Vec<StarAvailability> = tiers
        .stars()
        .map(|s| star_availability(roster, s, net_rating_known, params))
        .collect();

    let held: f64 = stars.iter().map(|s| s.effective_points).sum();
    let filled: f64 = stars.iter().map(|s| s.base_points()).sum();
    let neutral_slots = 1 + crate::player_impact::TIER_B_SLOTS - stars.len();

    TeamAvailability {
        team: team.to_string(),
        star_points: held + (STAR_POOL_POINTS - filled),
        neutral_slots,
        stars,
        usable_players: tiers.usable_players,
    }
}

pub fn resolve(
    home_team: &str,
    away_team: &str,
    home_roster: &[PlayerEntry],
    away_roster: &[PlayerEntry],
    net_ratings_known: (bool, bool),
    params: &LeagueParams,
) -> ResolvedAvailability {
    ResolvedAvailability {
        home: resolve_team(home_team, home_roster, net_ratings_known.0, params),
        away: resolve_team(away_team, away_roster, net_ratings_known.1, params),
    }
}
