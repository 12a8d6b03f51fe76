//! Nestmate Algo - Roommate compatibility matching service
//!
//! This library provides the compatibility matching engine used by the
//! Nestmate student housing app. It ranks candidate roommates against a
//! requester's stated preferences with a deterministic, multi-factor
//! weighted scoring system.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    aggregate, expand_priorities, score_pair, Factor, MatchMode, Matcher, PriorityWeights,
    WeightError, WeightVector,
};
pub use models::{AttributeBundle, FindMatchesRequest, FindMatchesResponse, RoommateMatch};
