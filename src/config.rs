//! Console configuration.

use bevy::prelude::*;

use crate::core::DEFAULT_LIMIT;

/// Default command prefix.
pub const DEFAULT_PREFIX: &str = "/";

/// Configuration read once when the console is created.
///
/// # Examples
///
/// ```
/// use bevy::prelude::KeyCode;
/// use bevy_runtime_console::ConsoleConfig;
///
/// let config = ConsoleConfig::default()
///     .prefix("!")
///     .capacity(200)
///     .toggle_key(KeyCode::F1);
///
/// assert_eq!(config.prefix, "!");
/// assert!(config.enabled);
/// ```
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Prefix marking a line as a command.
    pub prefix: String,
    /// Whether the console starts enabled.
    pub enabled: bool,
    /// Number of lines kept. Raised to 1 when lower.
    pub capacity: usize,
    /// Key cycling the view.
    pub toggle_key: KeyCode,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            enabled: true,
            capacity: DEFAULT_LIMIT,
            toggle_key: KeyCode::Backquote,
        }
    }
}

impl ConsoleConfig {
    /// Set the command prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set whether the console starts enabled.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the number of lines kept.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Set the key cycling the view.
    pub fn toggle_key(mut self, key: KeyCode) -> Self {
        self.toggle_key = key;
        self
    }
}
