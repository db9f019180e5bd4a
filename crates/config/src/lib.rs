//! Configuration management for the user simulator
//!
//! Supports loading configuration from:
//! - YAML/TOML files (config/default, config/{env})
//! - Environment variables (USERSIM_ prefix, `__` separator)
//!
//! # Data files
//!
//! Goal lists and the record database are plain JSON or YAML files
//! (TOML is accepted for goal lists), picked by file extension:
//! - `GoalList` implements `usersim_core::GoalSource`
//! - `RecordDatabase` implements `usersim_core::RecordLookup`

pub mod constants;
pub mod domain;
pub mod settings;

pub use domain::{GoalList, RecordDatabase};
pub use settings::{
    load_settings, DataConfig, ObservabilityConfig, RewardConfig, Settings, SimulatorConfig,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
