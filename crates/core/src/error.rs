//! Configuration error types.

use thiserror::Error;

/// Errors raised while assembling job configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing env var: {0}")]
    MissingKey(&'static str),

    #[error("invalid value for {key}: {value:?} is not a non-negative integer")]
    InvalidNumber { key: &'static str, value: String },

    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("failed to read env file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
