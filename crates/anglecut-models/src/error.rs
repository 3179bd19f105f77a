//! Configuration error types.

use thiserror::Error;

/// Result type for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while building or validating a director configuration.
///
/// These are rejected at startup and never surface from a running loop.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("At least one angle is required, got {0}")]
    NoAngles(usize),

    #[error("Split factor must lie strictly between 0 and 1, got {0}")]
    SplitOutOfRange(f64),

    #[error("Expected {expected} split factors, got {actual}")]
    SplitCountMismatch { expected: usize, actual: usize },

    #[error("{name} must be a finite, non-negative number, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("Lower weight must be greater than 1, got {0}")]
    LowerWeightTooSmall(f64),

    #[error("Analysis resolution must be non-zero, got {width}x{height}")]
    EmptyAnalysisSize { width: u32, height: u32 },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    /// Create an invalid value error for a named setting.
    pub fn invalid_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            value: value.into(),
        }
    }
}
