use crate::core::weights::Factor;
use crate::models::domain::RoommateMatch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response for find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<RoommateMatch>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Current weight vector snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsResponse {
    pub weights: BTreeMap<Factor, f64>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
