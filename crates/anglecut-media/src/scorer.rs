//! Activity scoring for a single angle.
//!
//! Play in this sport happens near the bottom band of each camera image, so
//! motion there counts more than motion higher up (spectators, reflections,
//! the surface). The lower region weight also compensates for the split
//! factor, so that moving the split does not simply rescale the score.

use anglecut_models::{AngleId, AngleReading, DirectorConfig, SplitFactor};

use crate::mask::{MotionMask, RegionMeans};

/// Converts a mask and split factor into a scalar action score.
///
/// Stateless and deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityScorer {
    lower_weight: f64,
}

impl ActivityScorer {
    /// Create a scorer with the given lower region weight (> 1).
    pub fn new(lower_weight: f64) -> Self {
        Self { lower_weight }
    }

    /// Create a scorer from a director configuration.
    pub fn from_config(config: &DirectorConfig) -> Self {
        Self::new(config.lower_weight)
    }

    /// Effective weight of the lower region mean.
    ///
    /// Formula: `(lower_weight + 1 - 2f) / (2 (1 - f))`
    pub fn lower_region_weight(&self, split: SplitFactor) -> f64 {
        let f = split.value();
        (self.lower_weight + 1.0 - 2.0 * f) / (2.0 * (1.0 - f))
    }

    /// Score precomputed region means.
    pub fn score_means(&self, means: RegionMeans, split: SplitFactor) -> f64 {
        self.lower_region_weight(split) * means.lower + means.upper
    }

    /// Score one angle's mask.
    pub fn score(&self, angle: AngleId, mask: &MotionMask, split: SplitFactor) -> AngleReading {
        let means = mask.region_means(split);
        self.reading(angle, means, split)
    }

    /// Build a reading from precomputed region means.
    pub fn reading(&self, angle: AngleId, means: RegionMeans, split: SplitFactor) -> AngleReading {
        AngleReading {
            angle,
            upper_mean: means.upper,
            lower_mean: means.lower,
            score: self.score_means(means, split),
        }
    }
}

impl Default for ActivityScorer {
    fn default() -> Self {
        Self::from_config(&DirectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(value: f64) -> SplitFactor {
        SplitFactor::new(value).unwrap()
    }

    #[test]
    fn test_lower_weight_at_middle_split() {
        let scorer = ActivityScorer::new(3.0);
        assert!((scorer.lower_region_weight(split(0.5)) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_lower_weight_formula() {
        let scorer = ActivityScorer::new(3.0);
        // (3 + 1 - 0.5) / (2 * 0.75)
        assert!((scorer.lower_region_weight(split(0.25)) - 3.5 / 1.5).abs() < 1e-12);
        // (3 + 1 - 1.5) / (2 * 0.25)
        assert!((scorer.lower_region_weight(split(0.75)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_score_weights_lower_region() {
        let scorer = ActivityScorer::new(3.0);
        let means = RegionMeans { upper: 10.0, lower: 4.0 };
        assert!((scorer.score_means(means, split(0.5)) - 22.0).abs() < 1e-12);
    }

    #[test]
    fn test_lower_motion_beats_upper_motion() {
        let scorer = ActivityScorer::default();
        let bottom = MotionMask::from_fn(16, 10, |(row, _)| if row >= 5 { 255 } else { 0 }).unwrap();
        let top = MotionMask::from_fn(16, 10, |(row, _)| if row < 5 { 255 } else { 0 }).unwrap();

        let a = scorer.score(AngleId(0), &bottom, SplitFactor::MIDDLE);
        let b = scorer.score(AngleId(1), &top, SplitFactor::MIDDLE);
        assert!(a.score > b.score);
        assert_eq!(a.angle, AngleId(0));
        assert_eq!(a.lower_mean, 255.0);
        assert_eq!(b.upper_mean, 255.0);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let scorer = ActivityScorer::default();
        let mask = MotionMask::from_fn(32, 18, |(r, c)| ((r * 31 + c * 17) % 256) as u8).unwrap();
        let first = scorer.score(AngleId(0), &mask, split(0.4));
        let second = scorer.score(AngleId(0), &mask, split(0.4));
        assert_eq!(first, second);
    }
}
