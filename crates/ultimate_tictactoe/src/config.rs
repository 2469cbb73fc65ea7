//! Engine configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Who moves first (and therefore plays X) in a new game.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstMoverPolicy {
    /// The player who issued the challenge.
    #[default]
    #[display("challenger")]
    Challenger,
    /// The challenged player.
    #[display("opponent")]
    Opponent,
    /// Either, with equal probability.
    #[display("random")]
    Random,
}

/// Configuration for a [`SessionRegistry`](crate::SessionRegistry).
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// First-mover policy.
    first_mover: FirstMoverPolicy,

    /// Seed for the `random` policy. Unset means seeded from entropy.
    seed: Option<u64>,
}

impl EngineConfig {
    /// Creates a configuration.
    pub fn new(first_mover: FirstMoverPolicy, seed: Option<u64>) -> Self {
        Self { first_mover, seed }
    }

    /// Parses configuration from TOML text. Missing keys take defaults.
    #[instrument(skip(content))]
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        debug!(first_mover = %config.first_mover, seed = ?config.seed, "Config parsed");
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&content)?;
        info!(first_mover = %config.first_mover, "Config loaded successfully");
        Ok(config)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
