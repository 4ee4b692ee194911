pub mod loader;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::game;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub rules: RulesConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Checks every section, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()
    }
}

// Tunable game rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub slot_count: usize,
    // A single cleared line scores grid_width * line_clear_factor
    pub line_clear_factor: u32,
    pub multi_line_bonus_multiplier: f64,
    pub refresh_penalty: u32,
    // Fixed seed for reproducible piece draws
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            grid_width: game::GRID_WIDTH,
            grid_height: game::GRID_HEIGHT,
            slot_count: game::NUM_PIECE_SLOTS,
            line_clear_factor: game::LINE_CLEAR_FACTOR,
            multi_line_bonus_multiplier: game::MULTI_LINE_BONUS_MULTIPLIER,
            refresh_penalty: game::REFRESH_PENALTY,
            seed: None,
        }
    }
}

impl RulesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be at least 1x1, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.slot_count == 0 {
            return Err(ConfigError::Invalid(
                "slot_count must be at least 1".to_string(),
            ));
        }
        if !self.multi_line_bonus_multiplier.is_finite() || self.multi_line_bonus_multiplier < 0.0
        {
            return Err(ConfigError::Invalid(format!(
                "multi_line_bonus_multiplier must be a non-negative number, got {}",
                self.multi_line_bonus_multiplier
            )));
        }
        Ok(())
    }

    /// Value of a single cleared line.
    #[must_use]
    pub fn line_clear_score(&self) -> u32 {
        game::line_clear_score(self.grid_width, self.line_clear_factor)
    }

    /// Total score for clearing `lines` rows and columns at once.
    #[must_use]
    pub fn clear_score(&self, lines: usize) -> u32 {
        game::clear_score(
            lines,
            self.line_clear_score(),
            self.multi_line_bonus_multiplier,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    // Overrides the per-user data directory location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_score_path: Option<PathBuf>,
}

// Custom error type for configuration operations
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config file error: {err}"),
            ConfigError::Parse(err) => write!(f, "config file is malformed: {err}"),
            ConfigError::Serialize(err) => write!(f, "could not encode config: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Serialize(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialize(err)
    }
}
