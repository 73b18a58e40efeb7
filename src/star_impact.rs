use crate::availability::{ResolvedAvailability, TeamAvailability};
use crate::player_impact::STAR_POOL_POINTS;
use crate::signal::clamp_unit;

/// Star Impact signed value: the effective star-point gap between the teams
/// over one team's full pool, so a healthy pair of rosters reads 0.0 and the
/// home side keeping all 8 points while the away side keeps none reads +1.
pub fn star_impact_value(availability: &ResolvedAvailability) -> f64 {
    let gap = availability.home.star_points - availability.away.star_points;
    clamp_unit(gap / STAR_POOL_POINTS)
}

/// Short `inputs_used` line: each team's effective points and who is missing.
pub fn describe(availability: &ResolvedAvailability) -> String {
    format!(
        "home {} | away {}",
        describe_team(&availability.home),
        describe_team(&availability.away)
    )
}

fn describe_team(team: &TeamAvailability) -> String {
    if team.is_neutral() {
        return format!("{} no stars identified", team.team);
    }
    let missing: Vec<String> = team
        .stars
        .iter()
        .filter(|s| s.multiplier < 1.0)
        .map(|s| {
            if s.dampener < 1.0 {
                format!("{} {} x{:.2}", s.name, s.status, s.dampener)
            } else {
                format!("{} {}", s.name, s.status)
            }
        })
        .collect();
    if missing.is_empty() {
        format!("{} {:.1}/{:.0}", team.team, team.star_points, STAR_POOL_POINTS)
    } else {
        format!(
            "{} {:.1}/{:.0} ({})",
            team.team,
            team.star_points,
            STAR_POOL_POINTS,
            missing.join(", ")
        )
    }
}
