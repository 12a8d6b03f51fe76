use crate::core::aggregator::score_pair;
use crate::core::weights::WeightVector;
use crate::models::{AttributeBundle, RoommateMatch};
use serde::{Deserialize, Serialize};

/// Raw factor score at or above this is reported as a strength.
pub const STRENGTH_THRESHOLD: f64 = 80.0;

/// Default weight (percent) at which a factor becomes eligible to
/// deal-break.
pub const DEFAULT_HIGH_PRIORITY_THRESHOLD: f64 = 15.0;

/// Score cap applied to deal-broken candidates under the penalize policy.
pub const PENALTY_FLOOR: u8 = 30;

/// Result list bounds.
pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 50;

/// What happens to a candidate with an unresolved deal-breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealBreakerPolicy {
    /// Drop the candidate from the ranked output entirely.
    Exclude,
    /// Keep the candidate but cap their total at [`PENALTY_FLOOR`].
    Penalize,
}

/// Ranking mode requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Aggregate score only.
    #[default]
    Standard,
    /// Aggregate plus per-factor breakdown, strengths and deal-breakers.
    Priority,
}

/// Result of one ranking run.
#[derive(Debug)]
pub struct MatchOutcome {
    pub matches: Vec<RoommateMatch>,
    pub total_candidates: usize,
}

/// Ranking engine: scores every candidate pair, orders, filters and
/// truncates.
///
/// Pure computation over the bundles it is handed; the weight vector is
/// injected per call so concurrent weight updates never bleed into a
/// ranking run half-way through.
#[derive(Debug, Clone)]
pub struct Matcher {
    high_priority_threshold: f64,
    deal_breaker_policy: DealBreakerPolicy,
}

impl Matcher {
    pub fn new(high_priority_threshold: f64, deal_breaker_policy: DealBreakerPolicy) -> Self {
        Self {
            high_priority_threshold,
            deal_breaker_policy,
        }
    }

    /// Rank candidates against the requester.
    ///
    /// Sort order is score descending with ties broken by candidate id
    /// ascending, so repeated runs over unchanged data are reproducible.
    /// `limit` is clamped to 1..=50.
    pub fn find_matches(
        &self,
        requester: &AttributeBundle,
        candidates: Vec<AttributeBundle>,
        weights: &WeightVector,
        mode: MatchMode,
        limit: usize,
    ) -> MatchOutcome {
        let total_candidates = candidates.len();
        let limit = limit.clamp(MIN_LIMIT, MAX_LIMIT);

        let mut matches: Vec<RoommateMatch> = candidates
            .into_iter()
            .filter(|candidate| candidate.user_id != requester.user_id)
            .filter_map(|candidate| match mode {
                MatchMode::Standard => Some(self.score_standard(requester, &candidate, weights)),
                MatchMode::Priority => self.score_priority(requester, &candidate, weights),
            })
            .collect();

        matches.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        matches.truncate(limit);

        MatchOutcome {
            matches,
            total_candidates,
        }
    }

    fn score_standard(
        &self,
        requester: &AttributeBundle,
        candidate: &AttributeBundle,
        weights: &WeightVector,
    ) -> RoommateMatch {
        let pair = score_pair(requester, candidate, weights);
        RoommateMatch {
            user_id: candidate.user_id.clone(),
            name: candidate.name.clone(),
            score: pair.total,
            breakdown: None,
            strengths: vec![],
            deal_breakers: vec![],
        }
    }

    /// Priority-mode scoring: annotate strengths, detect deal-breakers and
    /// apply the configured policy. Returns None when the candidate is
    /// dropped under the exclude policy.
    fn score_priority(
        &self,
        requester: &AttributeBundle,
        candidate: &AttributeBundle,
        weights: &WeightVector,
    ) -> Option<RoommateMatch> {
        let pair = score_pair(requester, candidate, weights);

        let mut strengths = Vec::new();
        let mut deal_breakers = Vec::new();
        for contribution in &pair.breakdown {
            if contribution.raw >= STRENGTH_THRESHOLD {
                strengths.push(contribution.factor);
            }
            // A zero raw score is a hard incompatibility; with enough weight
            // behind the factor it disqualifies the pairing.
            if contribution.raw == 0.0
                && weights.get(contribution.factor) >= self.high_priority_threshold
            {
                deal_breakers.push(contribution.factor);
            }
        }

        let mut score = pair.total;
        if !deal_breakers.is_empty() {
            match self.deal_breaker_policy {
                DealBreakerPolicy::Exclude => {
                    tracing::debug!(
                        "excluding candidate {} on deal-breakers {:?}",
                        candidate.user_id,
                        deal_breakers
                    );
                    return None;
                }
                DealBreakerPolicy::Penalize => score = score.min(PENALTY_FLOOR),
            }
        }

        Some(RoommateMatch {
            user_id: candidate.user_id.clone(),
            name: candidate.name.clone(),
            score,
            breakdown: Some(pair.breakdown),
            strengths,
            deal_breakers,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_HIGH_PRIORITY_THRESHOLD, DealBreakerPolicy::Exclude)
    }
}
