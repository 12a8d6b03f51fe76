use crate::core::matcher::MatchMode;
use crate::core::weights::{Factor, PriorityWeights};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Request to find roommate matches
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    /// Omitted limit falls back to the configured default.
    #[validate(range(min = 1))]
    #[serde(default)]
    pub limit: Option<u16>,
    #[serde(default)]
    pub mode: MatchMode,
}

/// Request to update the weight vector.
///
/// Carries either a (partial or full) factor map, merged onto the current
/// vector, or the six-category priority schema, expanded onto the factors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWeightsRequest {
    #[serde(default)]
    pub weights: Option<BTreeMap<Factor, f64>>,
    #[serde(default)]
    pub priorities: Option<PriorityWeights>,
}
