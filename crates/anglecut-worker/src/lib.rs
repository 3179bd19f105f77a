//! Angle director worker.
//!
//! This crate provides:
//! - Environment configuration for the director and its inputs
//! - Image-sequence pipeline with chained clips per angle
//! - Per-tick decision log
//! - Structured run logging

pub mod config;
pub mod decision_log;
pub mod error;
pub mod logging;
pub mod pipeline;

pub use config::WorkerConfig;
pub use decision_log::DecisionLog;
pub use error::{WorkerError, WorkerResult};
pub use logging::RunLogger;
pub use pipeline::{open_sources, run};
