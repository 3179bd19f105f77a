//! Runtime-adjustable split factors.
//!
//! Split factors can be changed while a run is in progress (an operator
//! nudging the split line for one camera). The step loop reads them once
//! per tick, so a writer on another thread only needs atomic stores.

use std::sync::atomic::{AtomicU64, Ordering};

use anglecut_models::{AngleId, DirectorConfig, SplitFactor};

use crate::error::{MediaError, MediaResult};

/// Per-angle split factors shared between the step loop and a controller.
///
/// Wrap in an `Arc` to share across threads.
#[derive(Debug)]
pub struct SplitFactors {
    // f64 bit patterns
    values: Vec<AtomicU64>,
}

impl SplitFactors {
    /// Create from initial factors, one per angle.
    pub fn new(initial: &[SplitFactor]) -> Self {
        Self {
            values: initial
                .iter()
                .map(|split| AtomicU64::new(split.value().to_bits()))
                .collect(),
        }
    }

    /// Create from the factors of a director configuration.
    pub fn from_config(config: &DirectorConfig) -> Self {
        let initial: Vec<SplitFactor> = AngleId::all(config.angles)
            .map(|angle| config.split_factor(angle))
            .collect();
        Self::new(&initial)
    }

    /// Number of angles.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no angles are tracked.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Current factor for an angle.
    pub fn get(&self, angle: AngleId) -> MediaResult<SplitFactor> {
        let bits = self
            .values
            .get(angle.index())
            .ok_or(MediaError::UnknownAngle(angle))?
            .load(Ordering::Relaxed);
        Ok(SplitFactor::new(f64::from_bits(bits))?)
    }

    /// Replace the factor for an angle; takes effect on the next tick.
    pub fn set(&self, angle: AngleId, split: SplitFactor) -> MediaResult<()> {
        self.values
            .get(angle.index())
            .ok_or(MediaError::UnknownAngle(angle))?
            .store(split.value().to_bits(), Ordering::Relaxed);
        Ok(())
    }

    /// Read every factor at once, in angle order.
    pub fn snapshot(&self) -> Vec<SplitFactor> {
        self.values
            .iter()
            .map(|v| {
                SplitFactor::new(f64::from_bits(v.load(Ordering::Relaxed)))
                    .unwrap_or(SplitFactor::MIDDLE)
            })
            .collect()
    }
}
