//! Run configuration, loaded from YAML. Every field has a default so an
//! empty document yields a usable config.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Which seat opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StartSeat {
    #[default]
    Random,
    P1,
    P2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub seed: u64,
    pub start_seat: StartSeat,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            start_seat: StartSeat::Random,
        }
    }
}

/// Which observation the environment hands to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeatureSchema {
    /// All three planes, 1080 values.
    #[default]
    Full,
    /// The legal-destination plane alone, 360 values.
    Moves,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub feature_schema: FeatureSchema,
    /// Steps per reward-average window.
    pub reward_window: u32,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            feature_schema: FeatureSchema::Full,
            reward_window: 4500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub dir: String,
    pub flush_every_lines: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: "logs".to_string(),
            flush_every_lines: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub session: SessionConfig,
    pub env: EnvConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(text)?)
    }
}
