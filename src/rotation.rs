//! Rotation Replacement: next-man-up quality when a star is missing.
//!
//! The factor sits in one of two states. It is `Inactive` unless a Tier A or
//! Tier B star on either team is OUT or DOUBTFUL, and while inactive it is
//! exactly 0.0. When active, each short-handed team is scored on how well its
//! best available bench scorer covers the missing star's points per minute.
//! A like-for-like replacement costs nothing, a weak one costs up to the
//! ceiling, and one that outscores the star earns a small capped bonus. The
//! two teams' points become edge points under the same ceiling, so the factor
//! can never move the edge by more than that many points whatever its weight.
//! Dampening does not apply here.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::availability::{ResolvedAvailability, TeamAvailability};
use crate::league_params::LeagueParams;
use crate::signal::clamp_unit;
use crate::snapshot::PlayerEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RotationState {
    #[default]
    Inactive,
    Active,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementCandidate {
    pub name: String,
    pub ppm: f64,
    pub mpg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamReplacement {
    pub team: String,
    /// Minutes-weighted points per minute of the absent stars.
    pub absent_star_ppm: f64,
    pub candidate: Option<ReplacementCandidate>,
    /// Candidate PPM over absent-star PPM; 0 without a candidate.
    pub ratio: f64,
    /// Edge points for this team: negative for weak cover, at most the
    /// replacement bonus for cover that beats the star.
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RotationOutcome {
    pub state: RotationState,
    pub home: Option<TeamReplacement>,
    pub away: Option<TeamReplacement>,
    /// Edge points toward home, within the rotation ceiling.
    pub points: f64,
}

impl RotationOutcome {
    pub fn inactive() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.state == RotationState::Active
    }

    /// Signed value for a factor of the given weight. Dividing the capped
    /// points by the weight keeps `weight * value` inside the ceiling; a small
    /// weight saturates first.
    pub fn signed_value(&self, weight: u32) -> f64 {
        if weight == 0 || !self.is_active() {
            return 0.0;
        }
        clamp_unit(self.points / weight as f64)
    }

    pub fn describe(&self) -> String {
        if !self.is_active() {
            return "inactive (no Tier A/B star out or doubtful)".to_string();
        }
        let side = |label: &str, team: &Option<TeamReplacement>| match team {
            None => format!("{label} full strength"),
            Some(t) => match &t.candidate {
                Some(c) => format!(
                    "{label} {} via {} ({:.2} ppm vs {:.2}, {:+.2} pts)",
                    t.team, c.name, c.ppm, t.absent_star_ppm, t.points
                ),
                None => format!("{label} {} no replacement ({:+.2} pts)", t.team, t.points),
            },
        };
        format!("{} | {}", side("home", &self.home), side("away", &self.away))
    }
}

fn replacement_order(a: &ReplacementCandidate, b: &ReplacementCandidate) -> Ordering {
    b.ppm
        .total_cmp(&a.ppm)
        .then_with(|| b.mpg.total_cmp(&a.mpg))
        .then_with(|| a.name.cmp(&b.name))
}

/// Non-star players expected to play with bench-sized minutes, best first.
pub fn replacement_candidates(
    roster: &[PlayerEntry],
    team: &TeamAvailability,
    params: &LeagueParams,
) -> Vec<ReplacementCandidate> {
    let mut out: Vec<ReplacementCandidate> = roster
        .iter()
        .enumerate()
        .filter(|(idx, p)| !team.is_star(*idx) && p.status.expected_to_play())
        .filter(|(_, p)| p.ppg.is_some() || p.ppm.is_some())
        .filter_map(|(_, p)| {
            let mpg = match p.mpg {
                Some(mpg) if mpg < params.replacement_min_mpg || mpg > params.replacement_max_mpg => {
                    return None;
                }
                Some(mpg) => mpg,
                None => params.default_bench_mpg,
            };
            let ppm = p.points_per_minute(params.default_bench_mpg);
            ppm.is_finite().then(|| ReplacementCandidate {
                name: p.name.clone(),
                ppm,
                mpg,
            })
        })
        .collect();
    out.sort_by(replacement_order);
    out
}

fn team_replacement(
    roster: &[PlayerEntry],
    team: &TeamAvailability,
    params: &LeagueParams,
) -> Option<TeamReplacement> {
    if !team.has_star_absence() {
        return None;
    }

    let mut minutes = 0.0;
    let mut points = 0.0;
    for star in team.absent_stars() {
        let player = &roster[star.roster_index];
        let mpg = player
            .mpg
            .filter(|m| m.is_finite() && *m > 0.0)
            .unwrap_or(params.default_star_mpg);
        minutes += mpg;
        points += player.points_per_minute(params.default_star_mpg) * mpg;
    }
    let absent_star_ppm = if minutes > 0.0 { points / minutes } else { 0.0 };

    let candidate = replacement_candidates(roster, team, params).into_iter().next();
    let ratio = match &candidate {
        None => 0.0,
        Some(_) if absent_star_ppm <= 0.0 => 1.0,
        Some(c) => c.ppm.max(0.0) / absent_star_ppm,
    };

    Some(TeamReplacement {
        team: team.team.clone(),
        absent_star_ppm,
        candidate,
        ratio,
        points: replacement_points(ratio, params),
    })
}

/// Bounded response to the replacement ratio: 0 at a like-for-like cover,
/// falling linearly to minus the ceiling as the ratio reaches 0.
pub fn replacement_points(ratio: f64, params: &LeagueParams) -> f64 {
    let ceiling = params.rotation_ceiling_points;
    (ceiling * (ratio - 1.0)).clamp(-ceiling, params.replacement_bonus_points)
}

/// Rotation state and edge points for one game.
pub fn evaluate_rotation(
    home_roster: &[PlayerEntry],
    away_roster: &[PlayerEntry],
    availability: &ResolvedAvailability,
    params: &LeagueParams,
) -> RotationOutcome {
    let home = team_replacement(home_roster, &availability.home, params);
    let away = team_replacement(away_roster, &availability.away, params);
    if home.is_none() && away.is_none() {
        return RotationOutcome::inactive();
    }

    let team_points = |t: &Option<TeamReplacement>| t.as_ref().map_or(0.0, |t| t.points);
    let ceiling = params.rotation_ceiling_points;
    let points = (team_points(&home) - team_points(&away)).clamp(-ceiling, ceiling);
    tracing::debug!(
        home = team_points(&home),
        away = team_points(&away),
        points,
        "rotation replacement active"
    );

    RotationOutcome {
        state: RotationState::Active,
        home,
        away,
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::resolve;
    use crate::snapshot::AvailabilityStatus::*;

    fn roster(team: &str) -> Vec<PlayerEntry> {
        vec![
            PlayerEntry::new("Star", team, 30.0, 6.0, 36.0),
            PlayerEntry::new("Second", team, 20.0, 4.0, 32.0),
            PlayerEntry::new("Third", team, 16.0, 3.0, 30.0),
            PlayerEntry::new("Sixth", team, 12.0, 2.0, 24.0),
            PlayerEntry::new("Deep", team, 4.0, 1.0, 8.0),
        ]
    }

    fn run(home: &[PlayerEntry], away: &[PlayerEntry]) -> RotationOutcome {
        let params = LeagueParams::defaults();
        let resolved = resolve("H", "A", home, away, (true, true), &params);
        evaluate_rotation(home, away, &resolved, &params)
    }

    #[test]
    fn stays_inactive_without_star_absence() {
        let mut home = roster("H");
        home[3].status = Out; // role player
        home[1].status = Questionable;
        let out = run(&home, &roster("A"));
        assert_eq!(out.state, RotationState::Inactive);
        assert_eq!(out.signed_value(4), 0.0);
    }

    #[test]
    fn away_star_out_penalises_away() {
        let mut away = roster("A");
        away[0].status = Out;
        let out = run(&roster("H"), &away);
        assert!(out.is_active());
        let t = out.away.as_ref().unwrap();
        assert_eq!(t.candidate.as_ref().unwrap().name, "Sixth");
        // 0.5 ppm covering 30/36 ppm.
        assert!((t.ratio - 0.6).abs() < 1e-12);
        assert!((t.points + 1.6).abs() < 1e-12);
        assert!((out.points - 1.6).abs() < 1e-12);
        assert!(out.signed_value(4) > 0.0);
        assert!(out.home.is_none());
    }

    #[test]
    fn weaker_bench_costs_more() {
        let mut strong = roster("A");
        strong[0].status = Out;
        let mut weak = strong.clone();
        weak[3].ppg = Some(4.0);

        let strong = run(&roster("H"), &strong);
        let weak = run(&roster("H"), &weak);
        let strong_pts = strong.away.as_ref().unwrap().points;
        let weak_pts = weak.away.as_ref().unwrap().points;
        assert!(weak_pts < strong_pts && strong_pts < 0.0, "{weak_pts} vs {strong_pts}");
        assert!(weak.points > strong.points);
    }

    #[test]
    fn no_candidate_costs_the_full_ceiling() {
        let away = vec![PlayerEntry::new("Only", "A", 25.0, 5.0, 34.0).with_status(Doubtful)];
        let out = run(&roster("H"), &away);
        assert!(out.is_active());
        let t = out.away.as_ref().unwrap();
        assert!(t.candidate.is_none());
        assert_eq!(t.ratio, 0.0);
        assert_eq!(t.points, -4.0);
        assert_eq!(out.points, 4.0);
        assert_eq!(out.signed_value(4), 1.0);
    }

    #[test]
    fn response_is_zero_at_parity_and_bonus_is_capped() {
        let params = LeagueParams::defaults();
        assert_eq!(replacement_points(1.0, &params), 0.0);
        assert_eq!(replacement_points(0.0, &params), -4.0);
        assert!((replacement_points(0.75, &params) + 1.0).abs() < 1e-12);
        assert_eq!(replacement_points(3.0, &params), 1.0);
        assert!(replacement_points(0.3, &params) < replacement_points(0.6, &params));
    }

    #[test]
    fn contribution_never_exceeds_ceiling() {
        // Home cover beats its star, away has nobody: +1 - (-4) caps at 4.
        let mut home = roster("H");
        home[0].status = Out;
        home[3].ppg = Some(40.0);
        let away = vec![PlayerEntry::new("Only", "A", 25.0, 5.0, 34.0).with_status(Out)];
        let out = run(&home, &away);
        assert_eq!(out.home.as_ref().unwrap().points, 1.0);
        assert_eq!(out.points, 4.0);
        for weight in [1u32, 2, 4, 7, 11, 30] {
            let contribution = weight as f64 * out.signed_value(weight);
            assert!(contribution.abs() <= 4.0 + 1e-9, "weight {weight}: {contribution}");
        }
    }

    #[test]
    fn candidates_skip_stars_injured_and_deep_bench() {
        let mut r = roster("H");
        r[3].status = Questionable;
        let params = LeagueParams::defaults();
        let resolved = resolve("H", "A", &r, &[], (true, true), &params);
        let names: Vec<String> = replacement_candidates(&r, &resolved.home, &params)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert!(names.is_empty(), "{names:?}");
    }
}
