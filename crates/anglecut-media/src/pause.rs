//! Game pause detection.
//!
//! The game counts as paused only when every angle is idle in both regions.
//! One angle with activity keeps the game live.

use anglecut_models::{AngleReading, DirectorConfig};

/// Classifies a tick as paused or live from per-angle region means.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauseDetector {
    lower_thresh: f64,
    upper_thresh: f64,
}

impl PauseDetector {
    /// Create a detector with explicit thresholds.
    pub fn new(lower_thresh: f64, upper_thresh: f64) -> Self {
        Self {
            lower_thresh,
            upper_thresh,
        }
    }

    /// Create a detector from a director configuration.
    pub fn from_config(config: &DirectorConfig) -> Self {
        Self::new(config.lower_thresh, config.upper_thresh)
    }

    /// Whether a single angle shows no play.
    pub fn is_idle(&self, reading: &AngleReading) -> bool {
        reading.lower_mean < self.lower_thresh && reading.upper_mean < self.upper_thresh
    }

    /// Whether the game is paused across all angles.
    ///
    /// An empty slice carries no evidence of a pause and returns false.
    pub fn is_paused(&self, readings: &[AngleReading]) -> bool {
        !readings.is_empty() && readings.iter().all(|r| self.is_idle(r))
    }
}
