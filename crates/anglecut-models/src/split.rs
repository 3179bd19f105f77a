//! Per-angle split factors.
//!
//! A split factor divides a motion mask into an upper band (rows above the
//! split) and a lower band (rows at or below it). Each camera is mounted at a
//! different height, so every angle carries its own factor.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ConfigError, ConfigResult};

/// Fraction in (0, 1) of mask rows counted as the upper region.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SplitFactor(f64);

impl SplitFactor {
    /// Split used when nothing else is configured.
    pub const MIDDLE: SplitFactor = SplitFactor(0.5);

    /// Create a split factor, rejecting values outside (0, 1).
    pub fn new(value: f64) -> ConfigResult<Self> {
        if value.is_finite() && value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(ConfigError::SplitOutOfRange(value))
        }
    }

    /// Map a slider position in `0..=max` onto a split factor.
    ///
    /// Uses `(pos + 1) / (max + 2)`, which never reaches 0 or 1.
    pub fn from_slider(pos: u32, max: u32) -> Self {
        let pos = pos.min(max);
        Self((pos as f64 + 1.0) / (max as f64 + 2.0))
    }

    /// Get the raw fraction.
    pub fn value(self) -> f64 {
        self.0
    }

    /// First row belonging to the lower region of a mask with `rows` rows.
    ///
    /// Halves round to even.
    pub fn split_row(self, rows: usize) -> usize {
        let row = (self.0 * rows as f64).round_ties_even();
        (row as usize).min(rows)
    }
}

impl Default for SplitFactor {
    fn default() -> Self {
        Self::MIDDLE
    }
}

impl TryFrom<f64> for SplitFactor {
    type Error = ConfigError;

    fn try_from(value: f64) -> ConfigResult<Self> {
        Self::new(value)
    }
}

impl From<SplitFactor> for f64 {
    fn from(split: SplitFactor) -> Self {
        split.0
    }
}

impl fmt::Display for SplitFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}
