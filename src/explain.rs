use crate::factors::FactorResult;

pub const SUMMARY_FACTORS: usize = 5;

/// Factors ordered by |contribution|, largest first. The sort is stable, so
/// equal magnitudes keep their declaration order.
pub fn rank_factors(results: &[FactorResult]) -> Vec<&FactorResult> {
    let mut ranked: Vec<&FactorResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.contribution.abs().total_cmp(&a.contribution.abs()));
    ranked
}

pub fn top_factors(results: &[FactorResult], n: usize) -> Vec<FactorResult> {
    rank_factors(results).into_iter().take(n).cloned().collect()
}

/// `"Net Rating:+4.2, Star Impact:-3.0, ..."` for the top five factors.
pub fn summary_line(results: &[FactorResult]) -> String {
    rank_factors(results)
        .into_iter()
        .take(SUMMARY_FACTORS)
        .map(|f| format!("{}:{:+.1}", f.name, f.contribution))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factors::FactorKind;

    fn r(kind: FactorKind, weight: u32, signed: f64) -> FactorResult {
        FactorResult::new(kind, weight, signed, String::new())
    }

    #[test]
    fn ranks_by_magnitude_and_keeps_declaration_order_on_ties() {
        let rows = vec![
            r(FactorKind::NetRating, 14, 0.3),
            r(FactorKind::StarImpact, 11, -0.5),
            r(FactorKind::HomeCourt, 4, 1.0),
            r(FactorKind::RestFatigue, 4, -1.0),
            r(FactorKind::Coaching, 2, 0.0),
        ];
        let names: Vec<&str> = rank_factors(&rows).iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Star Impact", "Net Rating", "Home Court", "Rest/Fatigue", "Coaching"]
        );
    }

    #[test]
    fn summary_takes_five_with_signs() {
        let rows: Vec<FactorResult> = [
            (FactorKind::NetRating, 0.3),
            (FactorKind::StarImpact, -0.5),
            (FactorKind::OffVsDef, 0.1),
            (FactorKind::Rebounding, 0.2),
            (FactorKind::PaceControl, 0.05),
            (FactorKind::BenchDepth, 0.01),
        ]
        .into_iter()
        .map(|(k, v)| r(k, 10, v))
        .collect();
        assert_eq!(
            summary_line(&rows),
            "Star Impact:-5.0, Net Rating:+3.0, Rebounding:+2.0, Off vs Def Efficiency:+1.0, Pace Control:+0.5"
        );
        assert_eq!(top_factors(&rows, 2).len(), 2);
        assert_eq!(summary_line(&[]), "");
    }
}
