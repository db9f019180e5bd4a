//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{paths, reward, run, slots};
use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Dialogue constants for the simulated user
    #[serde(default)]
    pub simulator: SimulatorConfig,

    /// Reward shaping for the training signal
    #[serde(default)]
    pub reward: RewardConfig,

    /// Goal and record file locations
    #[serde(default)]
    pub data: DataConfig,

    /// Process-wide seed; unseeded runs draw one from the OS
    #[serde(default)]
    pub seed: Option<u64>,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Constants that shape the simulated user's behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Agent round at which the episode is force-terminated as a failure
    #[serde(default = "default_max_round_num")]
    pub max_round_num: u32,

    /// Slot identifying the agent's proposed record
    #[serde(default = "default_primary_key")]
    pub primary_key: String,

    /// Inform slots the user always opens with when its goal has them
    #[serde(default = "default_required_init_informs")]
    pub required_init_informs: Vec<String>,

    /// Slots skipped when validating a proposed match
    #[serde(default = "default_no_query_keys")]
    pub no_query_keys: Vec<String>,

    /// Slots never relaxed after a `match_found` with no match
    #[serde(default = "default_match_relax_excluded")]
    pub match_relax_excluded: Vec<String>,
}

fn default_max_round_num() -> u32 {
    run::MAX_ROUND_NUM
}

fn default_primary_key() -> String {
    slots::PRIMARY_KEY.to_string()
}

fn default_required_init_informs() -> Vec<String> {
    to_owned_list(slots::REQUIRED_INIT_INFORMS)
}

fn default_no_query_keys() -> Vec<String> {
    to_owned_list(slots::NO_QUERY)
}

fn default_match_relax_excluded() -> Vec<String> {
    to_owned_list(slots::MATCH_RELAX_EXCLUDED)
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            max_round_num: default_max_round_num(),
            primary_key: default_primary_key(),
            required_init_informs: default_required_init_informs(),
            no_query_keys: default_no_query_keys(),
            match_relax_excluded: default_match_relax_excluded(),
        }
    }
}

/// Weights for mapping outcomes to rewards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    #[serde(default = "default_turn_penalty")]
    pub turn_penalty: f64,

    #[serde(default = "default_success_multiplier")]
    pub success_multiplier: f64,

    #[serde(default = "default_fail_multiplier")]
    pub fail_multiplier: f64,

    #[serde(default = "default_unsuitable_penalty")]
    pub unsuitable_penalty: f64,

    #[serde(default = "default_no_value_penalty")]
    pub no_value_penalty: f64,

    #[serde(default = "default_good_inform_bonus")]
    pub good_inform_bonus: f64,
}

fn default_turn_penalty() -> f64 {
    reward::TURN_PENALTY
}
fn default_success_multiplier() -> f64 {
    reward::SUCCESS_MULTIPLIER
}
fn default_fail_multiplier() -> f64 {
    reward::FAIL_MULTIPLIER
}
fn default_unsuitable_penalty() -> f64 {
    reward::UNSUITABLE_PENALTY
}
fn default_no_value_penalty() -> f64 {
    reward::NO_VALUE_PENALTY
}
fn default_good_inform_bonus() -> f64 {
    reward::GOOD_INFORM_BONUS
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            turn_penalty: default_turn_penalty(),
            success_multiplier: default_success_multiplier(),
            fail_multiplier: default_fail_multiplier(),
            unsuitable_penalty: default_unsuitable_penalty(),
            no_value_penalty: default_no_value_penalty(),
            good_inform_bonus: default_good_inform_bonus(),
        }
    }
}

impl RewardConfig {
    fn weights(&self) -> [(&'static str, f64); 6] {
        [
            ("reward.turn_penalty", self.turn_penalty),
            ("reward.success_multiplier", self.success_multiplier),
            ("reward.fail_multiplier", self.fail_multiplier),
            ("reward.unsuitable_penalty", self.unsuitable_penalty),
            ("reward.no_value_penalty", self.no_value_penalty),
            ("reward.good_inform_bonus", self.good_inform_bonus),
        ]
    }
}

/// Data file locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_goals_path")]
    pub goals_path: String,

    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_goals_path() -> String {
    paths::GOALS.to_string()
}

fn default_database_path() -> String {
    paths::DATABASE.to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            goals_path: default_goals_path(),
            database_path: default_database_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_simulator()?;
        self.validate_reward()?;
        Ok(())
    }

    fn validate_simulator(&self) -> Result<(), ConfigError> {
        let sim = &self.simulator;

        if sim.max_round_num == 0 {
            return Err(ConfigError::InvalidValue {
                field: "simulator.max_round_num".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        if sim.primary_key.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "simulator.primary_key".to_string(),
            ));
        }

        // The opening inform can never carry the match result
        if sim.required_init_informs.contains(&sim.primary_key) {
            return Err(ConfigError::InvalidValue {
                field: "simulator.required_init_informs".to_string(),
                message: format!(
                    "Primary key '{}' cannot be a required initial inform",
                    sim.primary_key
                ),
            });
        }

        Ok(())
    }

    fn validate_reward(&self) -> Result<(), ConfigError> {
        for (field, value) in self.reward.weights() {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: format!("Must be finite, got {}", value),
                });
            }
        }
        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (USERSIM_ prefix, e.g. USERSIM__SIMULATOR__MAX_ROUND_NUM)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("USERSIM")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("simulator.required_init_informs")
            .with_list_parse_key("simulator.no_query_keys")
            .with_list_parse_key("simulator.match_relax_excluded")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        max_round_num = settings.simulator.max_round_num,
        primary_key = %settings.simulator.primary_key,
        "Settings loaded"
    );

    Ok(settings)
}
