use crate::core::matcher::DealBreakerPolicy;
use crate::core::weights::{Factor, WeightVector, DEFAULT_TOLERANCE, STRICT_TOLERANCE};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub appwrite: AppwriteSettings,
    pub collection: CollectionSettings,
    pub matching: MatchingSettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    pub roommate_profiles: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Limit applied when a find request does not carry one.
    #[serde(default = "default_match_limit")]
    pub default_limit: u16,
    /// Upper bound on any requested limit.
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
    #[serde(default = "default_high_priority_threshold")]
    pub high_priority_threshold: f64,
    #[serde(default = "default_deal_breaker_policy")]
    pub deal_breaker_policy: DealBreakerPolicy,
    /// Tightens the weight-sum tolerance from 0.1 to 0.01.
    #[serde(default)]
    pub strict_weights: bool,
}

fn default_match_limit() -> u16 {
    20
}

fn default_max_limit() -> u16 {
    crate::core::matcher::MAX_LIMIT as u16
}

fn default_high_priority_threshold() -> f64 {
    crate::core::matcher::DEFAULT_HIGH_PRIORITY_THRESHOLD
}

fn default_deal_breaker_policy() -> DealBreakerPolicy {
    DealBreakerPolicy::Exclude
}

impl MatchingSettings {
    pub fn weight_tolerance(&self) -> f64 {
        if self.strict_weights {
            STRICT_TOLERANCE
        } else {
            DEFAULT_TOLERANCE
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

/// Per-factor percentage weights. Defaults are the curated distribution;
/// overrides must still sum to 100 within tolerance or startup fails.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_budget_weight")]
    pub budget: f64,
    #[serde(default = "default_cleanliness_weight")]
    pub cleanliness: f64,
    #[serde(default = "default_sleep_schedule_weight")]
    pub sleep_schedule: f64,
    #[serde(default = "default_pets_weight")]
    pub pets: f64,
    #[serde(default = "default_social_vibe_weight")]
    pub social_vibe: f64,
    #[serde(default = "default_move_in_date_weight")]
    pub move_in_date: f64,
    #[serde(default = "default_quiet_hours_weight")]
    pub quiet_hours: f64,
    #[serde(default = "default_smoking_weight")]
    pub smoking: f64,
    #[serde(default = "default_lease_length_weight")]
    pub lease_length: f64,
    #[serde(default = "default_max_distance_weight")]
    pub max_distance: f64,
    #[serde(default = "default_guests_frequency_weight")]
    pub guests_frequency: f64,
    #[serde(default = "default_work_from_home_weight")]
    pub work_from_home: f64,
    #[serde(default = "default_chores_weight")]
    pub chores: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            budget: default_budget_weight(),
            cleanliness: default_cleanliness_weight(),
            sleep_schedule: default_sleep_schedule_weight(),
            pets: default_pets_weight(),
            social_vibe: default_social_vibe_weight(),
            move_in_date: default_move_in_date_weight(),
            quiet_hours: default_quiet_hours_weight(),
            smoking: default_smoking_weight(),
            lease_length: default_lease_length_weight(),
            max_distance: default_max_distance_weight(),
            guests_frequency: default_guests_frequency_weight(),
            work_from_home: default_work_from_home_weight(),
            chores: default_chores_weight(),
        }
    }
}

impl WeightsConfig {
    /// Build the validated weight vector used at startup.
    pub fn to_weight_vector(
        &self,
        tolerance: f64,
    ) -> Result<WeightVector, crate::core::weights::WeightError> {
        let map = BTreeMap::from([
            (Factor::Budget, self.budget),
            (Factor::Cleanliness, self.cleanliness),
            (Factor::SleepSchedule, self.sleep_schedule),
            (Factor::Pets, self.pets),
            (Factor::SocialVibe, self.social_vibe),
            (Factor::MoveInDate, self.move_in_date),
            (Factor::QuietHours, self.quiet_hours),
            (Factor::Smoking, self.smoking),
            (Factor::LeaseLength, self.lease_length),
            (Factor::MaxDistance, self.max_distance),
            (Factor::GuestsFrequency, self.guests_frequency),
            (Factor::WorkFromHome, self.work_from_home),
            (Factor::Chores, self.chores),
        ]);
        WeightVector::with_tolerance(map, tolerance)
    }
}

fn default_budget_weight() -> f64 { 15.0 }
fn default_cleanliness_weight() -> f64 { 12.0 }
fn default_sleep_schedule_weight() -> f64 { 10.0 }
fn default_pets_weight() -> f64 { 10.0 }
fn default_social_vibe_weight() -> f64 { 8.0 }
fn default_move_in_date_weight() -> f64 { 8.0 }
fn default_quiet_hours_weight() -> f64 { 7.0 }
fn default_smoking_weight() -> f64 { 7.0 }
fn default_lease_length_weight() -> f64 { 6.0 }
fn default_max_distance_weight() -> f64 { 5.0 }
fn default_guests_frequency_weight() -> f64 { 5.0 }
fn default_work_from_home_weight() -> f64 { 4.0 }
fn default_chores_weight() -> f64 { 3.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with NESTMATE_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with NESTMATE_)
            // e.g., NESTMATE_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("NESTMATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("NESTMATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Substitute well-known environment variables into config values so the
/// Appwrite credentials can come straight from the deployment environment.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let appwrite_endpoint = env::var("NESTMATE_APPWRITE__ENDPOINT").ok();
    let appwrite_api_key = env::var("NESTMATE_APPWRITE__API_KEY").ok();
    let appwrite_project_id = env::var("NESTMATE_APPWRITE__PROJECT_ID").ok();
    let appwrite_database_id = env::var("NESTMATE_APPWRITE__DATABASE_ID").ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(endpoint) = appwrite_endpoint {
        builder = builder.set_override("appwrite.endpoint", endpoint)?;
    }
    if let Some(api_key) = appwrite_api_key {
        builder = builder.set_override("appwrite.api_key", api_key)?;
    }
    if let Some(project_id) = appwrite_project_id {
        builder = builder.set_override("appwrite.project_id", project_id)?;
    }
    if let Some(database_id) = appwrite_database_id {
        builder = builder.set_override("appwrite.database_id", database_id)?;
    }

    builder.build()
}
