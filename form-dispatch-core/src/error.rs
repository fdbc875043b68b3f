//! Error types for form-dispatch

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a [`DispatchConfig`](crate::config::DispatchConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {var}: expected milliseconds")]
    InvalidEnv { var: &'static str, value: String },
}
