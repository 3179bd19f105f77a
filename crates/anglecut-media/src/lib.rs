#![deny(unreachable_patterns)]
//! Camera angle selection and pause elision for multi-camera recordings.
//!
//! This crate provides:
//! - Motion-mask activity scoring with a weighted lower region
//! - Hysteresis switching between angles
//! - Pause detection with a bounded replay buffer
//! - Source/sink traits and a cancellable host loop
//! - Image-sequence adapters for frames and masks on disk

pub mod annotate;
pub mod director;
pub mod error;
pub mod image_seq;
pub mod mask;
pub mod metrics;
pub mod pause;
pub mod pause_buffer;
pub mod runner;
pub mod scorer;
pub mod source;
pub mod split;
pub mod switcher;

pub use annotate::{BorderMarker, FrameMarker};
pub use director::{AngleInput, Director, TickOutcome};
pub use error::{MediaError, MediaResult};
pub use image_seq::{ImageSequenceSink, ImageSequenceSource};
pub use mask::{MotionMask, RegionMeans};
pub use pause::PauseDetector;
pub use pause_buffer::PauseBuffer;
pub use runner::{run_director, run_director_with, RunSummary, StopReason};
pub use scorer::ActivityScorer;
pub use source::{
    CancellationSignal, ChainedSource, CollectingSink, FrameSource, MemorySource, NeverCancel,
    OutputSink,
};
pub use split::SplitFactors;
pub use switcher::{best_angle, SwitchController, SwitchDecision, SwitchState};

#[cfg(test)]
mod tests;
