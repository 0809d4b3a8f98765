//! Evaluation configuration.
//!
//! Provides configuration file support via `escibench.toml`, environment
//! variables, and caller-supplied overrides.
//!
//! # Priority (highest to lowest)
//!
//! 1. Caller overrides (CLI flags, embedded YAML sections)
//! 2. Environment variables (`ESCIBENCH_*`)
//! 3. Configuration file (`escibench.toml`)
//! 4. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::relevance::RelevanceMapping;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Evaluation configuration: cutoff depth and the grade-to-gain scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Truncation depth applied to each ranking before scoring.
    pub k: usize,
    /// Grade label to integer gain. Unknown labels are warned about at
    /// build time and score 0 at run time.
    pub gains: HashMap<String, u32>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            k: 10,
            gains: HashMap::from([
                ("E".to_string(), 3),
                ("S".to_string(), 2),
                ("C".to_string(), 1),
                ("I".to_string(), 0),
            ]),
        }
    }
}

impl EvalConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < `escibench.toml` < `ESCIBENCH_*` environment.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("escibench.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration parsing fails.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("ESCIBENCH_").split("_").lowercase(false));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the cutoff is zero. Unknown grade keys are not
    /// an error here; [`Self::mapping`] surfaces them as warnings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.k == 0 {
            return Err(ConfigError::InvalidValue {
                key: "k".to_string(),
                message: "cutoff must be >= 1".to_string(),
            });
        }
        Ok(())
    }

    /// Builds the [`RelevanceMapping`], returning unknown-grade warnings.
    #[must_use]
    pub fn mapping(&self) -> (RelevanceMapping, Vec<String>) {
        RelevanceMapping::from_config(&self.gains)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
