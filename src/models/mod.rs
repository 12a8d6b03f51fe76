// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AttributeBundle, BudgetRange, FactorContribution, PetsInfo, QuietHours, RoommateMatch,
    SleepSchedule, SocialVibe,
};
pub use requests::{FindMatchesRequest, UpdateWeightsRequest};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, WeightsResponse};
