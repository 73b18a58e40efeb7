use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::league_params::LeagueParams;
use crate::snapshot::PlayerEntry;

/// Assists are worth this many points in the impact metric.
pub const ASSIST_IMPACT_WEIGHT: f64 = 0.7;

pub const TIER_A_POINTS: f64 = 4.0;
pub const TIER_B_POINTS: f64 = 2.0;
pub const TIER_B_SLOTS: usize = 2;
/// Maximum star points a team can hold: one Tier A plus two Tier B.
pub const STAR_POOL_POINTS: f64 = TIER_A_POINTS + TIER_B_POINTS * TIER_B_SLOTS as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    A,
    B,
}

impl Tier {
    pub fn base_points(self) -> f64 {
        match self {
            Tier::A => TIER_A_POINTS,
            Tier::B => TIER_B_POINTS,
        }
    }
}

/// `PPG + 0.7 * APG`. `None` when the player has no usable scoring line.
pub fn impact_metric(player: &PlayerEntry) -> Option<f64> {
    let ppg = player.ppg.filter(|v| v.is_finite())?;
    let apg = player.apg.filter(|v| v.is_finite()).unwrap_or(0.0);
    Some(ppg + ASSIST_IMPACT_WEIGHT * apg)
}

/// A ranked star, pointing back into the roster slice it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedStar {
    pub index: usize,
    pub tier: Tier,
    pub impact: f64,
}

/// Tier A and Tier B for one team. Slots stay empty when the roster is too
/// thin; callers treat an empty slot as neutral.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StarTiers {
    pub tier_a: Option<RankedStar>,
    pub tier_b: Vec<RankedStar>,
    /// Players with a usable scoring line.
    pub usable_players: usize,
}

impl StarTiers {
    pub fn stars(&self) -> impl Iterator<Item = &RankedStar> {
        self.tier_a.iter().chain(self.tier_b.iter())
    }

    pub fn contains(&self, index: usize) -> bool {
        self.stars().any(|s| s.index == index)
    }

    pub fn is_empty(&self) -> bool {
        self.tier_a.is_none()
    }
}

fn sort_key_mpg(player: &PlayerEntry) -> f64 {
    player.mpg.filter(|v| v.is_finite()).unwrap_or(-1.0)
}

/// Impact descending, then PPG, then minutes, then name ascending so equal
/// lines always rank the same way.
fn rank_order(a: &(usize, f64), b: &(usize, f64), roster: &[PlayerEntry]) -> Ordering {
    let (pa, pb) = (&roster[a.0], &roster[b.0]);
    b.1.total_cmp(&a.1)
        .then_with(|| pb.ppg.unwrap_or(0.0).total_cmp(&pa.ppg.unwrap_or(0.0)))
        .then_with(|| sort_key_mpg(pb).total_cmp(&sort_key_mpg(pa)))
        .then_with(|| pa.name.cmp(&pb.name))
}

/// Rank a roster into star tiers. Only rotation players (minutes at or above
/// the rotation floor, or unknown minutes) are considered unless nobody
/// qualifies, in which case every usable player is ranked.
pub fn select_star_tiers(roster: &[PlayerEntry], params: &LeagueParams) -> StarTiers {
    let usable: Vec<(usize, f64)> = roster
        .iter()
        .enumerate()
        .filter_map(|(idx, p)| impact_metric(p).map(|impact| (idx, impact)))
        .collect();

    let rotation: Vec<(usize, f64)> = usable
        .iter()
        .copied()
        .filter(|(idx, _)| match roster[*idx].mpg {
            Some(mpg) => mpg >= params.min_rotation_mpg,
            None => true,
        })
        .collect();

    let mut ranked = if rotation.is_empty() {
        usable.clone()
    } else {
        rotation
    };
    ranked.sort_by(|a, b| rank_order(a, b, roster));

    let mut iter = ranked.into_iter();
    let tier_a = iter.next().map(|(index, impact)| RankedStar {
        index,
        tier: Tier::A,
        impact,
    });
    let tier_b = iter
        .take(TIER_B_SLOTS)
        .map(|(index, impact)| RankedStar {
            index,
            tier: Tier::B,
            impact,
        })
        .collect();

    StarTiers {
        tier_a,
        tier_b,
        usable_players: usable.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, ppg: f64, apg: f64, mpg: f64) -> PlayerEntry {
        PlayerEntry::new(name, "TST", ppg, apg, mpg)
    }

    fn names(tiers: &StarTiers, roster: &[PlayerEntry]) -> Vec<String> {
        tiers.stars().map(|s| roster[s.index].name.clone()).collect()
    }

    #[test]
    fn impact_weights_assists() {
        assert_eq!(impact_metric(&p("A", 25.0, 10.0, 35.0)), Some(32.0));
        let mut no_ppg = p("B", 0.0, 5.0, 30.0);
        no_ppg.ppg = None;
        assert_eq!(impact_metric(&no_ppg), None);
    }

    #[test]
    fn top_one_is_tier_a_next_two_tier_b() {
        let roster = vec![
            p("Role", 10.0, 2.0, 25.0),
            p("Star2", 25.0, 8.0, 34.0),
            p("Star1", 30.0, 10.0, 35.0),
            p("Star3", 20.0, 5.0, 32.0),
        ];
        let tiers = select_star_tiers(&roster, &LeagueParams::defaults());
        assert_eq!(names(&tiers, &roster), vec!["Star1", "Star2", "Star3"]);
        assert_eq!(tiers.tier_a.unwrap().tier, Tier::A);
        assert!(tiers.tier_b.iter().all(|s| s.tier == Tier::B));
        assert!(!tiers.contains(0));
    }

    #[test]
    fn ties_break_on_ppg_then_minutes_then_name() {
        // All three share impact 24.0.
        let roster = vec![
            p("Zed", 17.0, 10.0, 30.0),
            p("Amy", 24.0, 0.0, 30.0),
            p("Bob", 24.0, 0.0, 34.0),
            p("Cal", 24.0, 0.0, 34.0),
        ];
        let tiers = select_star_tiers(&roster, &LeagueParams::defaults());
        assert_eq!(names(&tiers, &roster), vec!["Bob", "Cal", "Amy"]);
    }

    #[test]
    fn bench_scorers_are_not_stars_while_rotation_exists() {
        let roster = vec![
            p("Starter", 15.0, 3.0, 30.0),
            p("Microwave", 22.0, 1.0, 14.0),
        ];
        let tiers = select_star_tiers(&roster, &LeagueParams::defaults());
        assert_eq!(names(&tiers, &roster), vec!["Starter"]);
    }

    #[test]
    fn falls_back_to_everyone_when_nobody_plays_rotation_minutes() {
        let roster = vec![p("A", 8.0, 1.0, 12.0), p("B", 11.0, 1.0, 15.0)];
        let tiers = select_star_tiers(&roster, &LeagueParams::defaults());
        assert_eq!(names(&tiers, &roster), vec!["B", "A"]);
    }

    #[test]
    fn thin_or_empty_rosters_leave_slots_empty() {
        let tiers = select_star_tiers(&[], &LeagueParams::defaults());
        assert!(tiers.is_empty());
        assert!(tiers.tier_b.is_empty());

        let roster = vec![p("Solo", 30.0, 5.0, 36.0)];
        let tiers = select_star_tiers(&roster, &LeagueParams::defaults());
        assert!(tiers.tier_a.is_some());
        assert!(tiers.tier_b.is_empty());
        assert_eq!(tiers.usable_players, 1);
    }
}
