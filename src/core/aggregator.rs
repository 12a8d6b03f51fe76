use crate::core::scorers::score_factor;
use crate::core::weights::WeightVector;
use crate::models::{AttributeBundle, FactorContribution};

/// Full scoring result for one requester/candidate pair.
#[derive(Debug, Clone)]
pub struct PairScore {
    /// Weighted aggregate, rounded to the nearest integer in 0-100.
    pub total: u8,
    /// Raw and weighted score for every factor in the weight vector.
    pub breakdown: Vec<FactorContribution>,
}

/// Score a pair across every factor in the weight vector.
///
/// Every factor is visited even when a bundle field is empty; the scorers
/// substitute neutral defaults, so the weighted average keeps its full
/// denominator.
pub fn score_pair(a: &AttributeBundle, b: &AttributeBundle, weights: &WeightVector) -> PairScore {
    let breakdown: Vec<FactorContribution> = weights
        .iter()
        .map(|(factor, weight)| {
            let raw = score_factor(factor, a, b);
            FactorContribution {
                factor,
                raw,
                weighted: raw * weight / 100.0,
            }
        })
        .collect();

    PairScore {
        total: total_from(&breakdown),
        breakdown,
    }
}

/// Weighted aggregate only, for callers that do not need the breakdown.
pub fn aggregate(a: &AttributeBundle, b: &AttributeBundle, weights: &WeightVector) -> u8 {
    score_pair(a, b, weights).total
}

fn total_from(breakdown: &[FactorContribution]) -> u8 {
    let sum: f64 = breakdown.iter().map(|c| c.weighted).sum();
    sum.clamp(0.0, 100.0).round() as u8
}
