//! Structured run logging utilities.
//!
//! Every log line of a run carries the same run id so that interleaved
//! output from several runs can be told apart.

use tracing::{error, info, warn, Span};
use uuid::Uuid;

use anglecut_media::RunSummary;

/// Run logger for structured logging with consistent formatting.
#[derive(Debug, Clone)]
pub struct RunLogger {
    run_id: String,
    operation: String,
}

impl RunLogger {
    /// Create a logger with a fresh run id.
    pub fn new(operation: &str) -> Self {
        Self::from_string(&Uuid::new_v4().to_string(), operation)
    }

    /// Create a logger for an existing run id.
    pub fn from_string(run_id: &str, operation: &str) -> Self {
        Self {
            run_id: run_id.to_string(),
            operation: operation.to_string(),
        }
    }

    pub fn log_start(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run started: {}", message
        );
    }

    pub fn log_progress(&self, message: &str) {
        info!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run progress: {}", message
        );
    }

    pub fn log_warning(&self, message: &str) {
        warn!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run warning: {}", message
        );
    }

    pub fn log_error(&self, message: &str) {
        error!(
            run_id = %self.run_id,
            operation = %self.operation,
            "Run error: {}", message
        );
    }

    /// Log the totals of a finished run.
    pub fn log_summary(&self, summary: &RunSummary) {
        info!(
            run_id = %self.run_id,
            operation = %self.operation,
            ticks = summary.ticks,
            frames_written = summary.frames_written,
            switches = summary.switches,
            pause_ticks = summary.pause_ticks,
            evicted_frames = summary.evicted_frames,
            discarded_pause_frames = summary.discarded_pause_frames,
            "Run completed: {:?}", summary.stop_reason
        );
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn operation(&self) -> &str {
        &self.operation
    }

    /// Create a tracing span for this run.
    ///
    /// Events logged inside the span inherit the run id, including those
    /// emitted by the director itself.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "run",
            run_id = %self.run_id,
            operation = %self.operation
        )
    }
}
