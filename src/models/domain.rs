use crate::core::weights::Factor;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Sleep schedule categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SleepSchedule {
    #[serde(rename = "early", alias = "Early bird")]
    Early,
    #[serde(rename = "late", alias = "Night owl")]
    Late,
    #[serde(rename = "flexible", alias = "Flexible")]
    Flexible,
}

/// Social energy categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialVibe {
    Quiet,
    Balanced,
    Lively,
}

/// Monthly budget range in whole currency units, min <= max.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: u32,
    pub max: u32,
}

/// Preferred quiet window as times of day. May wrap past midnight
/// (e.g. 22:00 to 07:00).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuietHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

/// Pet ownership and tolerance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PetsInfo {
    #[serde(rename = "hasPets", default)]
    pub has_pets: bool,
    #[serde(rename = "comfortableWithPets", default)]
    pub comfortable_with_pets: bool,
    #[serde(default)]
    pub allergies: Vec<String>,
}

/// Everything the engine needs to compare two people.
///
/// One bundle per user; identity fields are passed through unscored.
/// Optional fields deserialize as `None`/empty and scorers fall back to
/// neutral defaults, so a sparse bundle still scores on every factor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeBundle {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
    pub budget: BudgetRange,
    #[serde(rename = "sleepSchedule")]
    pub sleep_schedule: SleepSchedule,
    #[serde(rename = "socialVibe")]
    pub social_vibe: SocialVibe,
    /// 1 (relaxed) to 5 (spotless).
    pub cleanliness: u8,
    #[serde(rename = "moveInDate", default)]
    pub move_in_date: Option<NaiveDate>,
    #[serde(rename = "leaseLengths", default)]
    pub lease_lengths: Vec<String>,
    /// Walk-time bucket to campus, e.g. "10min".
    #[serde(rename = "maxDistance")]
    pub max_distance: String,
    #[serde(rename = "quietHours")]
    pub quiet_hours: QuietHours,
    #[serde(default)]
    pub chores: Option<String>,
    #[serde(rename = "guestsFrequency", default)]
    pub guests_frequency: Option<String>,
    #[serde(rename = "workFromHomeDays", default)]
    pub work_from_home_days: u8,
    #[serde(default)]
    pub pets: PetsInfo,
    #[serde(rename = "smokingPolicies", default)]
    pub smoking_policies: Vec<String>,
}

/// One factor's share of a candidate's aggregate score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorContribution {
    pub factor: Factor,
    /// Raw scorer output, 0-100.
    pub raw: f64,
    /// Raw score scaled by the factor's weight.
    pub weighted: f64,
}

/// Ranked match result for one candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoommateMatch {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    /// Aggregate compatibility, 0-100.
    pub score: u8,
    /// Per-factor weighted contributions; populated in priority mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<FactorContribution>>,
    /// Factors scoring >= 80, for explainability.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strengths: Vec<Factor>,
    /// High-weight factors with a hard incompatibility.
    #[serde(rename = "dealBreakers", default, skip_serializing_if = "Vec::is_empty")]
    pub deal_breakers: Vec<Factor>,
}
