//! Declarative factor configurations.
//!
//! A configuration is an ordered list of `(factor, weight)` pairs. The order is
//! the declaration order the explainer falls back to on ties. Built-in sets are
//! checked at compile time; caller-supplied sets are checked once, when the
//! `FactorSet` is built, so an invalid set never reaches scoring.

use std::collections::HashSet;
use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::factors::FactorKind;
use crate::factors::FactorKind::*;

pub const FACTOR_SET_ENV: &str = "NBA_EDGE_FACTOR_SET";
pub const TOTAL_WEIGHT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorSpec {
    pub kind: FactorKind,
    pub weight: u32,
}

const fn spec(kind: FactorKind, weight: u32) -> FactorSpec {
    FactorSpec { kind, weight }
}

const fn weight_total(specs: &[FactorSpec]) -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < specs.len() {
        total += specs[i].weight;
        i += 1;
    }
    total
}

/// 15 factors, shooting merged into one efficiency factor.
pub const V15: [FactorSpec; 15] = [
    spec(NetRating, 20),
    spec(StarImpact, 13),
    spec(OffVsDef, 10),
    spec(TurnoverDiff, 7),
    spec(ShootingEfficiency, 12),
    spec(FreeThrowRate, 6),
    spec(Rebounding, 7),
    spec(HomeCourt, 4),
    spec(RestFatigue, 6),
    spec(RimProtection, 3),
    spec(PerimeterDefense, 3),
    spec(BenchDepth, 3),
    spec(PaceControl, 2),
    spec(Coaching, 2),
    spec(Motivation, 2),
];

/// V15 plus rotation replacement, matchup fit and the late-game proxy.
pub const V18: [FactorSpec; 18] = [
    spec(NetRating, 15),
    spec(StarImpact, 11),
    spec(RotationReplacement, 4),
    spec(OffVsDef, 9),
    spec(TurnoverDiff, 6),
    spec(ShootingEfficiency, 10),
    spec(FreeThrowRate, 5),
    spec(Rebounding, 6),
    spec(HomeCourt, 4),
    spec(RestFatigue, 5),
    spec(RimProtection, 4),
    spec(PerimeterDefense, 4),
    spec(MatchupFit, 3),
    spec(BenchDepth, 5),
    spec(PaceControl, 3),
    spec(LateGameCreation, 3),
    spec(Coaching, 2),
    spec(Motivation, 1),
];

/// Shooting split into shot quality and three-point edge; foul trouble and
/// shooting variance added; no rotation replacement.
pub const V20: [FactorSpec; 20] = [
    spec(NetRating, 15),
    spec(StarImpact, 12),
    spec(OffVsDef, 8),
    spec(TurnoverDiff, 6),
    spec(ShotQuality, 6),
    spec(ThreePointEdge, 6),
    spec(FreeThrowRate, 5),
    spec(Rebounding, 5),
    spec(HomeCourt, 4),
    spec(RestFatigue, 5),
    spec(RimProtection, 4),
    spec(PerimeterDefense, 4),
    spec(MatchupFit, 3),
    spec(BenchDepth, 3),
    spec(PaceControl, 3),
    spec(LateGameCreation, 3),
    spec(FoulTroubleRisk, 2),
    spec(ShootingVariance, 2),
    spec(Coaching, 2),
    spec(Motivation, 2),
];

/// Current default.
pub const V21: [FactorSpec; 21] = [
    spec(NetRating, 14),
    spec(StarImpact, 11),
    spec(RotationReplacement, 4),
    spec(OffVsDef, 8),
    spec(TurnoverDiff, 5),
    spec(ShotQuality, 5),
    spec(ThreePointEdge, 5),
    spec(FreeThrowRate, 4),
    spec(Rebounding, 5),
    spec(HomeRoadSplit, 4),
    spec(HomeCourt, 4),
    spec(RestFatigue, 5),
    spec(RimProtection, 4),
    spec(PerimeterDefense, 4),
    spec(MatchupFit, 3),
    spec(BenchDepth, 3),
    spec(PaceControl, 3),
    spec(LateGameCreation, 3),
    spec(ShootingVariance, 2),
    spec(Coaching, 2),
    spec(Motivation, 2),
];

const _: () = assert!(weight_total(&V15) == TOTAL_WEIGHT);
const _: () = assert!(weight_total(&V18) == TOTAL_WEIGHT);
const _: () = assert!(weight_total(&V20) == TOTAL_WEIGHT);
const _: () = assert!(weight_total(&V21) == TOTAL_WEIGHT);

pub const BUILT_IN: [(&str, &[FactorSpec]); 4] =
    [("v15", &V15), ("v18", &V18), ("v20", &V20), ("v21", &V21)];

/// A validated factor configuration. Fields are private: the only ways in are
/// the built-ins and [`FactorSet::custom`], both of which guarantee weights
/// summing to 100 with no duplicate or zero-weight factor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawFactorSet")]
pub struct FactorSet {
    name: String,
    factors: Vec<FactorSpec>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawFactorSet {
    name: String,
    factors: Vec<FactorSpec>,
}

impl TryFrom<RawFactorSet> for FactorSet {
    type Error = EngineError;

    fn try_from(raw: RawFactorSet) -> EngineResult<Self> {
        FactorSet::custom(&raw.name, raw.factors)
    }
}

impl Default for FactorSet {
    fn default() -> Self {
        Self::v21()
    }
}

impl FactorSet {
    fn built_in(name: &str, specs: &[FactorSpec]) -> Self {
        Self {
            name: name.to_string(),
            factors: specs.to_vec(),
        }
    }

    pub fn v15() -> Self {
        Self::built_in("v15", &V15)
    }

    pub fn v18() -> Self {
        Self::built_in("v18", &V18)
    }

    pub fn v20() -> Self {
        Self::built_in("v20", &V20)
    }

    pub fn v21() -> Self {
        Self::built_in("v21", &V21)
    }

    pub fn by_name(name: &str) -> EngineResult<Self> {
        let key = name.trim().to_ascii_lowercase();
        BUILT_IN
            .iter()
            .find(|(n, _)| *n == key)
            .map(|(n, specs)| Self::built_in(n, specs))
            .ok_or_else(|| EngineError::UnknownFactorSet(name.to_string()))
    }

    /// Set named by `NBA_EDGE_FACTOR_SET`, or the default when unset.
    pub fn from_env() -> EngineResult<Self> {
        match env::var(FACTOR_SET_ENV) {
            Ok(raw) if !raw.trim().is_empty() => Self::by_name(&raw),
            _ => Ok(Self::default()),
        }
    }

    pub fn custom(name: &str, factors: Vec<FactorSpec>) -> EngineResult<Self> {
        if factors.is_empty() {
            return Err(EngineError::EmptyFactorSet(name.to_string()));
        }
        let mut seen = HashSet::new();
        for spec in &factors {
            if spec.weight == 0 {
                return Err(EngineError::ZeroWeight {
                    set: name.to_string(),
                    factor: spec.kind.key(),
                });
            }
            if !seen.insert(spec.kind) {
                return Err(EngineError::DuplicateFactor {
                    set: name.to_string(),
                    factor: spec.kind.key(),
                });
            }
        }
        let total: u32 = factors.iter().map(|s| s.weight).sum();
        if total != TOTAL_WEIGHT {
            return Err(EngineError::WeightSum {
                set: name.to_string(),
                total,
            });
        }
        Ok(Self {
            name: name.to_string(),
            factors,
        })
    }

    /// Build a custom set from `(factor key, weight)` pairs.
    pub fn from_pairs(name: &str, pairs: &[(&str, u32)]) -> EngineResult<Self> {
        let factors = pairs
            .iter()
            .map(|(key, weight)| {
                FactorKind::from_key(key)
                    .map(|kind| FactorSpec {
                        kind,
                        weight: *weight,
                    })
                    .ok_or_else(|| EngineError::UnknownFactor(key.to_string()))
            })
            .collect::<EngineResult<Vec<_>>>()?;
        Self::custom(name, factors)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn factors(&self) -> &[FactorSpec] {
        &self.factors
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn weight_of(&self, kind: FactorKind) -> Option<u32> {
        self.factors.iter().find(|s| s.kind == kind).map(|s| s.weight)
    }

    pub fn total_weight(&self) -> u32 {
        self.factors.iter().map(|s| s.weight).sum()
    }
}
