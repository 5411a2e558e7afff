//! Error types for engine configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors loading or validating an engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML is malformed or has unknown keys.
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Bounds with min above max, or a non-finite limit.
    #[error("invalid bounds for field '{field}': [{min}, {max}]")]
    InvalidBounds { field: String, min: f64, max: f64 },

    /// A list that must not be empty is empty.
    #[error("config key '{key}' must not be empty")]
    Empty { key: &'static str },
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
