//! Persistence layer for console configuration.
//!
//! Provides RON-based save/load for the settings in [`ConsoleConfig`].

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::{ConsoleConfig, DEFAULT_PREFIX};
use crate::core::DEFAULT_LIMIT;

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "console.ron";

/// Serializable console configuration.
///
/// Missing fields take their default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfigFile {
    /// Command prefix.
    pub prefix: String,
    /// Whether the console starts enabled.
    pub enabled: bool,
    /// Number of lines kept.
    pub capacity: usize,
}

impl Default for ConsoleConfigFile {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            enabled: true,
            capacity: DEFAULT_LIMIT,
        }
    }
}

impl From<&ConsoleConfig> for ConsoleConfigFile {
    fn from(config: &ConsoleConfig) -> Self {
        Self {
            prefix: config.prefix.clone(),
            enabled: config.enabled,
            capacity: config.capacity,
        }
    }
}

impl ConsoleConfigFile {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))?;

        ron::from_str(&contents)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))
    }

    /// Save config to a RON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::Io(parent.display().to_string(), e.to_string()))?;
            }
        }

        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);

        let contents = ron::ser::to_string_pretty(self, pretty)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))
    }

    /// Load config from file, returning default if file doesn't exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Copy the stored settings into `config`, leaving the toggle key alone.
    pub fn apply_to(&self, config: &mut ConsoleConfig) {
        config.prefix = self.prefix.clone();
        config.enabled = self.enabled;
        config.capacity = self.capacity.max(1);
    }
}

/// Errors that can occur during config operations.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// IO error (path, message).
    Io(String, String),
    /// Parse error (path, message).
    Parse(String, String),
    /// Serialization error.
    Serialize(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, msg) => write!(f, "IO error for '{}': {}", path, msg),
            ConfigError::Parse(path, msg) => write!(f, "Parse error for '{}': {}", path, msg),
            ConfigError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Build a [`ConsoleConfig`] from a config file.
///
/// A missing file yields the defaults; an unreadable one is reported and
/// also yields the defaults.
pub fn load_console_config(path: impl AsRef<Path>) -> ConsoleConfig {
    let path = path.as_ref();
    let mut config = ConsoleConfig::default();

    if !path.exists() {
        info!("No console config found at '{}', using defaults", path.display());
        return config;
    }

    match ConsoleConfigFile::load(path) {
        Ok(file) => {
            info!("Loading console config from '{}'", path.display());
            file.apply_to(&mut config);
        }
        Err(e) => {
            error!("Failed to load console config: {}", e);
        }
    }

    config
}

/// Save the persistent part of `config` to file.
pub fn save_console_config(config: &ConsoleConfig, path: impl AsRef<Path>) -> Result<(), ConfigError> {
    ConsoleConfigFile::from(config).save(path)
}
