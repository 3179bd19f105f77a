//! Shared data models for the anglecut director.
//!
//! This crate provides Serde-serializable types for:
//! - Camera angle identifiers and per-angle split factors
//! - Director configuration and its validation
//! - Per-tick decision records

pub mod angle;
pub mod config;
pub mod decision;
pub mod error;
pub mod split;

// Re-export common types
pub use angle::AngleId;
pub use config::DirectorConfig;
pub use decision::{AngleReading, TickDecision};
pub use error::{ConfigError, ConfigResult};
pub use split::SplitFactor;
