//! Worker error types.

use thiserror::Error;

use anglecut_media::MediaError;
use anglecut_models::ConfigError;

pub type WorkerResult<T> = Result<T, WorkerError>;

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Media error: {0}")]
    Media(#[from] MediaError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Metrics exporter failed: {0}")]
    Metrics(String),

    #[error("Director task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl WorkerError {
    pub fn metrics(msg: impl Into<String>) -> Self {
        Self::Metrics(msg.into())
    }

    /// Whether the failure comes from bad settings rather than bad input.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            WorkerError::Config(_) | WorkerError::Media(MediaError::Config(_))
        )
    }
}
