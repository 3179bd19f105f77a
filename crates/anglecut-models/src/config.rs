//! Director configuration.
//!
//! Thresholds depend on the noise floor of the mask producer, so every
//! constant the decision core uses is a named setting here.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::angle::AngleId;
use crate::error::{ConfigError, ConfigResult};
use crate::split::SplitFactor;

/// Configuration for one director run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DirectorConfig {
    /// Number of synchronized camera angles (default: 2)
    pub angles: usize,

    /// Initial split factor per angle (default: 0.5 each)
    #[schemars(with = "Vec<f64>")]
    pub split_factors: Vec<SplitFactor>,

    /// Minimum ticks between consecutive angle switches (default: 60)
    pub min_wait: u32,

    /// Weight of the lower mask region relative to the upper one (default: 3.0)
    pub lower_weight: f64,

    /// Lower-region mean below which an angle looks idle (default: 3.0)
    pub lower_thresh: f64,

    /// Upper-region mean below which an angle looks idle (default: 35.0)
    pub upper_thresh: f64,

    /// Frames from the end of a pause replayed when play resumes (default: 150)
    pub pause_end_frames: usize,

    /// Cut detected pauses out of the output (default: false)
    pub elide_pauses: bool,

    /// Width of the border painted on buffered pause frames, 0 disables (default: 20)
    pub pause_border_px: u32,

    /// Mask analysis width in pixels (default: 320)
    pub analysis_width: u32,

    /// Mask analysis height in pixels (default: 180)
    pub analysis_height: u32,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            angles: 2,
            split_factors: vec![SplitFactor::MIDDLE; 2],
            min_wait: 60,
            lower_weight: 3.0,
            lower_thresh: 3.0,
            upper_thresh: 35.0,
            pause_end_frames: 150,
            elide_pauses: false,
            pause_border_px: 20,
            analysis_width: 320,
            analysis_height: 180,
        }
    }
}

impl DirectorConfig {
    /// Default configuration for `angles` cameras, all split in the middle.
    pub fn for_angles(angles: usize) -> Self {
        Self {
            angles,
            split_factors: vec![SplitFactor::MIDDLE; angles],
            ..Default::default()
        }
    }

    /// Builder-style setter for the dwell time.
    pub fn with_min_wait(mut self, ticks: u32) -> Self {
        self.min_wait = ticks;
        self
    }

    /// Builder-style setter for the lower region weight.
    pub fn with_lower_weight(mut self, weight: f64) -> Self {
        self.lower_weight = weight;
        self
    }

    /// Builder-style setter for both pause thresholds.
    pub fn with_thresholds(mut self, lower: f64, upper: f64) -> Self {
        self.lower_thresh = lower;
        self.upper_thresh = upper;
        self
    }

    /// Builder-style setter for the pause tail length.
    pub fn with_pause_end_frames(mut self, frames: usize) -> Self {
        self.pause_end_frames = frames;
        self
    }

    /// Builder-style setter enabling pause elision.
    pub fn with_pause_elision(mut self, enabled: bool) -> Self {
        self.elide_pauses = enabled;
        self
    }

    /// Builder-style setter for the pause border width.
    pub fn with_pause_border(mut self, px: u32) -> Self {
        self.pause_border_px = px;
        self
    }

    /// Builder-style setter for the per-angle split factors.
    pub fn with_split_factors(mut self, splits: Vec<SplitFactor>) -> Self {
        self.split_factors = splits;
        self
    }

    /// Builder-style setter for the mask analysis resolution.
    pub fn with_analysis_size(mut self, width: u32, height: u32) -> Self {
        self.analysis_width = width;
        self.analysis_height = height;
        self
    }

    /// Configured split factor for an angle, falling back to the middle.
    pub fn split_factor(&self, angle: AngleId) -> SplitFactor {
        self.split_factors
            .get(angle.index())
            .copied()
            .unwrap_or(SplitFactor::MIDDLE)
    }

    /// Check every setting, returning the first problem found.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.angles == 0 {
            return Err(ConfigError::NoAngles(self.angles));
        }

        if self.split_factors.len() != self.angles {
            return Err(ConfigError::SplitCountMismatch {
                expected: self.angles,
                actual: self.split_factors.len(),
            });
        }

        if !self.lower_weight.is_finite() || self.lower_weight <= 1.0 {
            return Err(ConfigError::LowerWeightTooSmall(self.lower_weight));
        }

        check_threshold("lower_thresh", self.lower_thresh)?;
        check_threshold("upper_thresh", self.upper_thresh)?;

        if self.analysis_width == 0 || self.analysis_height == 0 {
            return Err(ConfigError::EmptyAnalysisSize {
                width: self.analysis_width,
                height: self.analysis_height,
            });
        }

        Ok(())
    }
}

fn check_threshold(name: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}
