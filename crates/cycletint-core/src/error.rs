//! Core error types for cycletint-core.
//!
//! The calculators themselves are total except for [`InvalidConfiguration`];
//! everything else here belongs to settings persistence and caller input.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for cycletint-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A cycle configuration the calculators cannot work with
    #[error("Invalid cycle configuration: {0}")]
    InvalidConfiguration(#[from] InvalidConfiguration),

    /// Caller input errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

impl CoreError {
    /// True when the error only means no start date has been recorded yet.
    pub fn is_missing_start_date(&self) -> bool {
        matches!(self, CoreError::Config(ConfigError::MissingKey(key)) if key == crate::storage::START_DATE_KEY)
    }
}

/// A cycle configuration that cannot produce a well-defined result.
///
/// Returned as a value so a caller iterating over many dates can detect the
/// problem once and abort the batch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidConfiguration {
    #[error("cycle length must be greater than zero")]
    ZeroCycleLength,

    #[error(
        "period length ({period_length}) must be shorter than cycle length ({cycle_length}) to leave days for the gradient"
    )]
    NoGradientSpan {
        cycle_length: u32,
        period_length: u32,
    },

    #[error("palette needs at least 2 colors, got {len}")]
    PaletteTooShort { len: usize },

    #[error("opacity must be within 0.0..=1.0, got {value}")]
    OpacityOutOfRange { value: f64 },

    #[error("debounce delay must be at most {max} ms, got {value}")]
    DebounceTooLong { value: u64, max: u64 },
}

/// Settings-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load settings
    #[error("Failed to load settings from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save settings
    #[error("Failed to save settings to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid settings value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Missing required settings key
    #[error("Missing required configuration key: {0}")]
    MissingKey(String),
}

/// Validation errors for caller-supplied input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Not a calendar date in `YYYY-MM-DD` form
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    /// Not a `#RRGGBB` / `#RGB` color
    #[error("Invalid color '{input}': expected #RRGGBB")]
    InvalidColor { input: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
