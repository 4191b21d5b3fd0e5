//! Configuration error types.

use thiserror::Error;

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying loader failure (missing or unparseable values).
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors from validating configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required value was not provided.
    #[error("missing required configuration: {0}")]
    MissingRequired(&'static str),

    /// The configured port cannot be bound.
    #[error("invalid server port: {0}")]
    InvalidPort(u16),
}
