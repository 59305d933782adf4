//! Core error types for pomowick-core.
//!
//! Each collaborator has its own error enum; [`CoreError`] wraps them for
//! callers that just want to bubble a failure up.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomowick-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Statistics storage errors
    #[error("Stats error: {0}")]
    Stats(#[from] StatsError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The data directory could not be determined or created
    #[error("Cannot prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load settings
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save settings
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("unknown settings key: {0}")]
    UnknownKey(String),

    /// Value does not fit the key's type or range
    #[error("Invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Statistics storage errors.
#[derive(Error, Debug)]
pub enum StatsError {
    /// Failed to open the database
    #[error("Failed to open stats database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    /// A stored day could not be parsed back into a date
    #[error("Corrupt day key in stats database: {0}")]
    BadDay(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A segment duration was zero, negative or not a number
    #[error("Focus and rest durations must be positive (got {field} = {value})")]
    NonPositiveDuration { field: &'static str, value: String },

    /// A daily goal was not in HH:MM form
    #[error("Invalid daily goal '{0}': use HH:MM format")]
    BadGoal(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
