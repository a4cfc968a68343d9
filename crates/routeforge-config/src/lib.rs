//! Configuration system for RouteForge.
//!
//! Load routing configuration from TOML or YAML files to control the
//! driving-speed model, the score director and runtime assertions without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use routeforge_config::{EnvironmentMode, RoutingConfig, ScoreDirectorType};
//!
//! let config = RoutingConfig::from_toml_str(r#"
//!     environment_mode = "full_assert"
//!     average_speed_kmph = 40.0
//!     score_director = "easy"
//! "#).unwrap();
//!
//! assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
//! assert_eq!(config.average_speed_kmph, 40.0);
//! assert_eq!(config.score_director, ScoreDirectorType::Easy);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use routeforge_config::RoutingConfig;
//!
//! let config = RoutingConfig::load("routing.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! assert_eq!(config.average_speed_kmph, 50.0);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Average driving speed when none is configured.
pub const DEFAULT_AVERAGE_SPEED_KMPH: f64 = 50.0;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main routing configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RoutingConfig {
    /// Environment mode affecting runtime assertions.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Speed used to turn great-circle distance into driving time.
    #[serde(default = "default_average_speed_kmph")]
    pub average_speed_kmph: f64,

    /// How scores are calculated.
    #[serde(default)]
    pub score_director: ScoreDirectorType,
}

fn default_average_speed_kmph() -> f64 {
    DEFAULT_AVERAGE_SPEED_KMPH
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            environment_mode: EnvironmentMode::default(),
            average_speed_kmph: DEFAULT_AVERAGE_SPEED_KMPH,
            score_director: ScoreDirectorType::default(),
        }
    }
}

impl RoutingConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the average driving speed.
    pub fn with_average_speed_kmph(mut self, speed: f64) -> Self {
        self.average_speed_kmph = speed;
        self
    }

    /// Sets the score director type.
    pub fn with_score_director(mut self, score_director: ScoreDirectorType) -> Self {
        self.score_director = score_director;
        self
    }

    /// Checks values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.average_speed_kmph.is_finite() || self.average_speed_kmph <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "average_speed_kmph must be positive and finite, got {}",
                self.average_speed_kmph
            )));
        }
        Ok(())
    }
}

/// Environment mode affecting runtime checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Non-reproducible mode with minimal overhead.
    #[default]
    NonReproducible,

    /// Fast assert mode: the score is checked against a full recalculation
    /// after each mutation.
    FastAssert,

    /// Full assert mode: like fast assert, and arrival times and chain links
    /// are checked too.
    FullAssert,
}

impl EnvironmentMode {
    /// Returns true if incremental results are checked after each mutation.
    pub fn is_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FastAssert | EnvironmentMode::FullAssert)
    }

    /// Returns true if arrival times and chain links are checked as well.
    pub fn is_fully_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Score director selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDirectorType {
    /// Rescore the whole plan on demand.
    Easy,

    /// Update per-entity totals from variable-change notifications.
    #[default]
    Incremental,
}

#[cfg(test)]
mod tests;
