use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Allowed deviation of the weight sum from 100.
pub const DEFAULT_TOLERANCE: f64 = 0.1;
/// Tighter tolerance used when `matching.strict_weights` is enabled.
pub const STRICT_TOLERANCE: f64 = 0.01;

/// The thirteen comparison dimensions used by the matching engine.
///
/// Wire names are camelCase to match the Appwrite document fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Factor {
    #[serde(rename = "budget")]
    Budget,
    #[serde(rename = "sleepSchedule")]
    SleepSchedule,
    #[serde(rename = "cleanliness")]
    Cleanliness,
    #[serde(rename = "socialVibe")]
    SocialVibe,
    #[serde(rename = "moveInDate")]
    MoveInDate,
    #[serde(rename = "leaseLength")]
    LeaseLength,
    #[serde(rename = "maxDistance")]
    MaxDistance,
    #[serde(rename = "quietHours")]
    QuietHours,
    #[serde(rename = "chores")]
    Chores,
    #[serde(rename = "guestsFrequency")]
    GuestsFrequency,
    #[serde(rename = "workFromHome")]
    WorkFromHome,
    #[serde(rename = "pets")]
    Pets,
    #[serde(rename = "smoking")]
    Smoking,
}

impl Factor {
    /// Every factor, in canonical order.
    pub const ALL: [Factor; 13] = [
        Factor::Budget,
        Factor::SleepSchedule,
        Factor::Cleanliness,
        Factor::SocialVibe,
        Factor::MoveInDate,
        Factor::LeaseLength,
        Factor::MaxDistance,
        Factor::QuietHours,
        Factor::Chores,
        Factor::GuestsFrequency,
        Factor::WorkFromHome,
        Factor::Pets,
        Factor::Smoking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Budget => "budget",
            Factor::SleepSchedule => "sleepSchedule",
            Factor::Cleanliness => "cleanliness",
            Factor::SocialVibe => "socialVibe",
            Factor::MoveInDate => "moveInDate",
            Factor::LeaseLength => "leaseLength",
            Factor::MaxDistance => "maxDistance",
            Factor::QuietHours => "quietHours",
            Factor::Chores => "chores",
            Factor::GuestsFrequency => "guestsFrequency",
            Factor::WorkFromHome => "workFromHome",
            Factor::Pets => "pets",
            Factor::Smoking => "smoking",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised when constructing or updating a weight vector
#[derive(Debug, Error)]
pub enum WeightError {
    #[error("weights sum to {sum:.2}, deviating {deviation:.2}% from 100 (tolerance {tolerance})")]
    SumOutOfTolerance {
        sum: f64,
        deviation: f64,
        tolerance: f64,
    },

    #[error("missing weight for factor '{0}'")]
    MissingFactor(Factor),

    #[error("negative weight {weight} for factor '{factor}'")]
    NegativeWeight { factor: Factor, weight: f64 },
}

/// Percentage weight per factor, always summing to 100 within tolerance.
///
/// The vector is immutable once built; `merge` produces a new validated
/// vector so a failed update can never leave a half-applied state behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightVector {
    weights: BTreeMap<Factor, f64>,
    #[serde(skip, default = "default_tolerance")]
    tolerance: f64,
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl WeightVector {
    /// Build a vector from a complete factor map, validating the sum invariant.
    pub fn new(weights: BTreeMap<Factor, f64>) -> Result<Self, WeightError> {
        Self::with_tolerance(weights, DEFAULT_TOLERANCE)
    }

    /// Build a vector with an explicit tolerance (0.01 in strict mode).
    pub fn with_tolerance(
        weights: BTreeMap<Factor, f64>,
        tolerance: f64,
    ) -> Result<Self, WeightError> {
        for factor in Factor::ALL {
            match weights.get(&factor) {
                None => return Err(WeightError::MissingFactor(factor)),
                Some(w) if *w < 0.0 || w.is_nan() => {
                    return Err(WeightError::NegativeWeight { factor, weight: *w });
                }
                Some(_) => {}
            }
        }

        let sum: f64 = weights.values().sum();
        let deviation = (sum - 100.0).abs();
        if deviation > tolerance {
            return Err(WeightError::SumOutOfTolerance {
                sum,
                deviation,
                tolerance,
            });
        }

        Ok(Self { weights, tolerance })
    }

    /// Overlay a partial factor map and revalidate.
    ///
    /// Returns a new vector; `self` is untouched, so an invalid partial
    /// update is rejected atomically.
    pub fn merge(&self, partial: &BTreeMap<Factor, f64>) -> Result<Self, WeightError> {
        let mut next = self.weights.clone();
        for (factor, weight) in partial {
            next.insert(*factor, *weight);
        }
        Self::with_tolerance(next, self.tolerance)
    }

    /// Owned copy of the factor map for callers; the live vector stays private.
    pub fn snapshot(&self) -> BTreeMap<Factor, f64> {
        self.weights.clone()
    }

    pub fn get(&self, factor: Factor) -> f64 {
        self.weights.get(&factor).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        self.weights.iter().map(|(f, w)| (*f, *w))
    }

    /// Equal split across all 13 factors: twelve entries at 7.69 and chores
    /// bumped to 7.72 so the total lands exactly on 100.
    pub fn equal_split() -> Self {
        let mut weights = BTreeMap::new();
        for factor in Factor::ALL {
            weights.insert(factor, 7.69);
        }
        weights.insert(Factor::Chores, 7.72);
        Self {
            weights,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Default for WeightVector {
    /// Curated distribution: budget weighted highest, then day-to-day
    /// livability factors, tapering to chores. Sums to exactly 100.
    fn default() -> Self {
        let weights = BTreeMap::from([
            (Factor::Budget, 15.0),
            (Factor::Cleanliness, 12.0),
            (Factor::SleepSchedule, 10.0),
            (Factor::Pets, 10.0),
            (Factor::SocialVibe, 8.0),
            (Factor::MoveInDate, 8.0),
            (Factor::QuietHours, 7.0),
            (Factor::Smoking, 7.0),
            (Factor::LeaseLength, 6.0),
            (Factor::MaxDistance, 5.0),
            (Factor::GuestsFrequency, 5.0),
            (Factor::WorkFromHome, 4.0),
            (Factor::Chores, 3.0),
        ]);
        Self {
            weights,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// The six-category priority schema exposed by the onboarding flow.
/// Percentages, expected to sum to 100 like the factor schema.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriorityWeights {
    pub budget: f64,
    pub location: f64,
    pub lifestyle: f64,
    pub pets: f64,
    pub timing: f64,
    pub work: f64,
}

/// Fractional split of each priority category onto factors.
/// Each table sums to 1.0 so expansion preserves the overall total.
const BUDGET_SPLIT: &[(Factor, f64)] = &[(Factor::Budget, 1.0)];
const LOCATION_SPLIT: &[(Factor, f64)] = &[(Factor::MaxDistance, 1.0)];
const LIFESTYLE_SPLIT: &[(Factor, f64)] = &[
    (Factor::SleepSchedule, 0.25),
    (Factor::Cleanliness, 0.25),
    (Factor::SocialVibe, 0.20),
    (Factor::QuietHours, 0.10),
    (Factor::GuestsFrequency, 0.10),
    (Factor::Chores, 0.05),
    (Factor::Smoking, 0.05),
];
const PETS_SPLIT: &[(Factor, f64)] = &[(Factor::Pets, 1.0)];
const TIMING_SPLIT: &[(Factor, f64)] = &[(Factor::MoveInDate, 0.6), (Factor::LeaseLength, 0.4)];
const WORK_SPLIT: &[(Factor, f64)] = &[(Factor::WorkFromHome, 1.0)];

fn apply_split(weights: &mut BTreeMap<Factor, f64>, category_pct: f64, split: &[(Factor, f64)]) {
    for (factor, fraction) in split {
        *weights.entry(*factor).or_insert(0.0) += category_pct * fraction;
    }
}

/// Expand the six-category priority schema onto the 13-factor vector.
pub fn expand_priorities(priorities: &PriorityWeights) -> Result<WeightVector, WeightError> {
    let mut weights = BTreeMap::new();
    for factor in Factor::ALL {
        weights.insert(factor, 0.0);
    }

    apply_split(&mut weights, priorities.budget, BUDGET_SPLIT);
    apply_split(&mut weights, priorities.location, LOCATION_SPLIT);
    apply_split(&mut weights, priorities.lifestyle, LIFESTYLE_SPLIT);
    apply_split(&mut weights, priorities.pets, PETS_SPLIT);
    apply_split(&mut weights, priorities.timing, TIMING_SPLIT);
    apply_split(&mut weights, priorities.work, WORK_SPLIT);

    WeightVector::new(weights)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vector_sums_to_100() {
        let vector = WeightVector::default();
        let sum: f64 = vector.snapshot().values().sum();
        assert!((sum - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_budget_weighted_highest() {
        let vector = WeightVector::default();
        for factor in Factor::ALL {
            assert!(vector.get(Factor::Budget) >= vector.get(factor));
        }
    }

    #[test]
    fn test_equal_split_sums_to_100() {
        let vector = WeightVector::equal_split();
        let sum: f64 = vector.snapshot().values().sum();
        assert!((sum - 100.0).abs() < DEFAULT_TOLERANCE);
        assert_eq!(vector.get(Factor::Chores), 7.72);
        assert_eq!(vector.get(Factor::Budget), 7.69);
    }

    #[test]
    fn test_new_rejects_bad_sum() {
        let mut weights = WeightVector::default().snapshot();
        weights.insert(Factor::Budget, 50.0);

        let result = WeightVector::new(weights);
        assert!(matches!(
            result,
            Err(WeightError::SumOutOfTolerance { .. })
        ));
    }

    #[test]
    fn test_new_rejects_missing_factor() {
        let mut weights = WeightVector::default().snapshot();
        weights.remove(&Factor::Pets);

        let result = WeightVector::new(weights);
        assert!(matches!(result, Err(WeightError::MissingFactor(Factor::Pets))));
    }

    #[test]
    fn test_new_rejects_negative_weight() {
        let mut weights = WeightVector::default().snapshot();
        weights.insert(Factor::Budget, -15.0);
        weights.insert(Factor::Cleanliness, 42.0);

        let result = WeightVector::new(weights);
        assert!(matches!(result, Err(WeightError::NegativeWeight { .. })));
    }

    #[test]
    fn test_merge_valid_partial() {
        let vector = WeightVector::default();
        // Shift 5 points from budget to cleanliness
        let partial = BTreeMap::from([(Factor::Budget, 10.0), (Factor::Cleanliness, 17.0)]);

        let merged = vector.merge(&partial).unwrap();
        assert_eq!(merged.get(Factor::Budget), 10.0);
        assert_eq!(merged.get(Factor::Cleanliness), 17.0);
        assert_eq!(merged.get(Factor::Pets), 10.0);
    }

    #[test]
    fn test_merge_invalid_partial_leaves_original_unchanged() {
        let vector = WeightVector::default();
        let partial = BTreeMap::from([(Factor::Budget, 90.0)]);

        assert!(vector.merge(&partial).is_err());
        assert_eq!(vector.get(Factor::Budget), 15.0);
    }

    #[test]
    fn test_strict_tolerance() {
        let mut weights = WeightVector::default().snapshot();
        weights.insert(Factor::Budget, 15.05);

        // 0.05 off: fine by default, rejected in strict mode
        assert!(WeightVector::with_tolerance(weights.clone(), DEFAULT_TOLERANCE).is_ok());
        assert!(WeightVector::with_tolerance(weights, STRICT_TOLERANCE).is_err());
    }

    #[test]
    fn test_split_tables_sum_to_one() {
        for split in [
            BUDGET_SPLIT,
            LOCATION_SPLIT,
            LIFESTYLE_SPLIT,
            PETS_SPLIT,
            TIMING_SPLIT,
            WORK_SPLIT,
        ] {
            let sum: f64 = split.iter().map(|(_, frac)| frac).sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_expand_priorities() {
        let priorities = PriorityWeights {
            budget: 30.0,
            location: 10.0,
            lifestyle: 30.0,
            pets: 10.0,
            timing: 10.0,
            work: 10.0,
        };

        let vector = expand_priorities(&priorities).unwrap();
        assert_eq!(vector.get(Factor::Budget), 30.0);
        assert_eq!(vector.get(Factor::MaxDistance), 10.0);
        assert_eq!(vector.get(Factor::SleepSchedule), 7.5);
        assert_eq!(vector.get(Factor::MoveInDate), 6.0);
        assert_eq!(vector.get(Factor::LeaseLength), 4.0);
        assert_eq!(vector.get(Factor::WorkFromHome), 10.0);

        let sum: f64 = vector.snapshot().values().sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_expand_priorities_rejects_bad_sum() {
        let priorities = PriorityWeights {
            budget: 50.0,
            location: 50.0,
            lifestyle: 50.0,
            pets: 0.0,
            timing: 0.0,
            work: 0.0,
        };

        assert!(expand_priorities(&priorities).is_err());
    }

    #[test]
    fn test_factor_wire_names() {
        let json = serde_json::to_string(&Factor::SleepSchedule).unwrap();
        assert_eq!(json, r#""sleepSchedule""#);

        let parsed: Factor = serde_json::from_str(r#""guestsFrequency""#).unwrap();
        assert_eq!(parsed, Factor::GuestsFrequency);
    }
}
