//! Dispatch configuration
//!
//! Loaded from TOML. Every section is optional:
//!
//! ```toml
//! [debounce]
//! keystroke = 250      # milliseconds
//!
//! [log]
//! capacity = 100
//! include = "UPDATE_*"
//! exclude = "SHOW_*"
//! ```
//!
//! An explicit `[debounce]` table replaces the default windows rather than
//! extending them. Set a window to `0` to dispatch that key immediately.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::action::DebounceKey;
use crate::debounce::DebounceConfig;
use crate::error::ConfigError;
use crate::logger::{ActionLogConfig, ActionLoggerConfig};

/// Environment variable overriding the keystroke debounce window, in milliseconds.
pub const KEYSTROKE_ENV: &str = "FORM_DISPATCH_KEYSTROKE_MS";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    pub debounce: DebounceConfig,
    pub log: LogSettings,
}

/// Action log settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    /// Number of applied actions kept in history
    pub capacity: usize,
    /// Comma-separated glob patterns of action names to log
    pub include: Option<String>,
    /// Comma-separated glob patterns of action names to skip
    pub exclude: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            capacity: 100,
            include: None,
            exclude: None,
        }
    }
}

impl LogSettings {
    pub fn filter(&self) -> ActionLoggerConfig {
        ActionLoggerConfig::new(self.include.as_deref(), self.exclude.as_deref())
    }

    pub fn log_config(&self) -> ActionLogConfig {
        ActionLogConfig::new(self.capacity, self.filter())
    }
}

impl DispatchConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw)?;
        tracing::debug!(path = %path.display(), "Loaded dispatch config");
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_with(|var| std::env::var(var).ok())
    }

    /// Apply overrides using `lookup` to read variables
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(KEYSTROKE_ENV) {
            let ms: u64 = value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: KEYSTROKE_ENV,
                value: value.clone(),
            })?;
            self.debounce
                .set_window(DebounceKey::keystroke(), Duration::from_millis(ms));
        }
        Ok(self)
    }

    /// Disable every debounce window
    pub fn without_debounce(mut self) -> Self {
        self.debounce = DebounceConfig::empty();
        self
    }
}
