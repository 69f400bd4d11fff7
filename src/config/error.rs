//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    #[error("Tracing subscriber could not be installed: {0}")]
    TracingInit(String),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("File storage requires a non-empty path")]
    MissingStoragePath,

    #[error("Invalid log filter '{0}'")]
    InvalidLogFilter(String),

    #[error("Maximum consumed weight must be a positive number")]
    InvalidMaxConsumedWeight,

    #[error("Drift tolerance must be a positive number")]
    InvalidDriftTolerance,

    #[error("History limit must be at least 1")]
    InvalidHistoryLimit,
}
