//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid script identifier for {field}: {reason}")]
    InvalidIdentifier { field: &'static str, reason: String },

    #[error("Invalid command timeout")]
    InvalidTimeout,

    #[error("Engine id for {0} cannot be blank")]
    BlankEngineId(&'static str),

    #[error("Invalid default project id")]
    InvalidProjectId,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
