#![warn(clippy::all, clippy::pedantic)]

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use super::{Config, ConfigError};

// Fallback config location when no user config directory is available
const CONFIG_FILE_PATH: &str = "config/pastelpop.toml";

// Environment variable that overrides the config file location
pub const CONFIG_ENV_VAR: &str = "PASTELPOP_CONFIG";

/// Loads the configuration from its default location, creating the file
/// with defaults if it does not exist yet.
pub fn load_config_from_file() -> Result<Config, ConfigError> {
    load_config_from_path(&get_config_file_path())
}

/// Saves the configuration to its default location.
pub fn save_config_to_file(config: &Config) -> Result<(), ConfigError> {
    save_config_to_path(config, &get_config_file_path())
}

pub fn load_config_from_path(config_path: &Path) -> Result<Config, ConfigError> {
    if !config_path.exists() {
        info!(
            "No config at {}, writing defaults",
            config_path.display()
        );
        let default_config = Config::default();
        save_config_to_path(&default_config, config_path)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&contents)?;
    config.validate()?;

    debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

pub fn save_config_to_path(config: &Config, config_path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = config_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(config_path, toml_string)?;

    Ok(())
}

/// Resolves the config file path: the environment override first, then the
/// user's config directory, then a path relative to the working directory.
#[must_use]
pub fn get_config_file_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("pastelpop").join("config.toml")
    } else {
        PathBuf::from(CONFIG_FILE_PATH)
    }
}
