//! Error types for media operations.

use thiserror::Error;

use anglecut_models::{AngleId, ConfigError};

/// Result type for media operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while directing a multi-angle recording.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Malformed motion mask: {0}")]
    MalformedMask(String),

    #[error("Mask for angle {angle} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    MaskSizeMismatch {
        angle: AngleId,
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Expected input for {expected} angles, got {actual}")]
    AngleCountMismatch { expected: usize, actual: usize },

    #[error("Unknown angle {0}")]
    UnknownAngle(AngleId),

    #[error("Unable to open angle {angle}: {message}")]
    SourceOpen { angle: AngleId, message: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

impl MediaError {
    /// Create a malformed mask error.
    pub fn malformed_mask(message: impl Into<String>) -> Self {
        Self::MalformedMask(message.into())
    }

    /// Create a source open failure for an angle.
    pub fn source_open(angle: AngleId, message: impl Into<String>) -> Self {
        Self::SourceOpen {
            angle,
            message: message.into(),
        }
    }
}
