// Configuration Management
//
// This crate handles all configuration loading for the smoke-test harness.
// It provides:
// - Configuration structs and deserialization
// - File and environment loading logic
// - Default values matching the deployed payment platform
//
// Test cases receive configuration explicitly; nothing here is global state.

use std::path::Path;
use thiserror::Error;

pub mod types;

// Re-export all configuration types
pub use types::*;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found. Tried paths: {paths}")]
    FileNotFound { paths: String },

    #[error("Failed to read configuration file: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {source}")]
    ParseError {
        #[from]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration loading interface
impl HarnessConfig {
    /// Load configuration from YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: HarnessConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        let config_paths = ["config/smoke.yaml", "smoke.yaml", "config/default.yaml"];

        for path in &config_paths {
            if Path::new(path).exists() {
                return Self::load_from_file(path);
            }
        }

        Err(ConfigError::FileNotFound {
            paths: config_paths.join(", "),
        })
    }
}
