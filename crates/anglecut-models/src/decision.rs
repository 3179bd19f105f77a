//! Per-tick decision records.
//!
//! One `TickDecision` is produced for every synchronized tick. The worker
//! writes them as JSON lines so a run can be audited after the fact.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::angle::AngleId;

/// Region means and combined score of one angle for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AngleReading {
    /// Angle the reading belongs to
    pub angle: AngleId,
    /// Mean mask intensity above the split row
    pub upper_mean: f64,
    /// Mean mask intensity at and below the split row
    pub lower_mean: f64,
    /// Weighted activity score
    pub score: f64,
}

/// Outcome of a single director tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TickDecision {
    /// Zero-based tick index
    pub tick: u64,
    /// Readings for every angle, in angle order
    pub readings: Vec<AngleReading>,
    /// Highest scoring angle this tick
    pub best_angle: AngleId,
    /// Angle whose frame was chosen
    pub selected_angle: AngleId,
    /// Whether the active angle changed this tick
    pub switched: bool,
    /// Whether the game was detected as paused
    pub paused: bool,
    /// Frames released to the output sink this tick
    pub released_frames: usize,
    /// Frames dropped from the front of a full pause buffer this tick
    pub evicted_frames: usize,
    /// Frames held in the pause buffer after this tick
    pub buffered_frames: usize,
}

impl TickDecision {
    /// Whether the chosen angle differs from the best scoring one.
    pub fn held_back(&self) -> bool {
        self.best_angle != self.selected_angle
    }

    /// Score of the selected angle, if a reading exists for it.
    pub fn selected_score(&self) -> Option<f64> {
        self.readings
            .iter()
            .find(|r| r.angle == self.selected_angle)
            .map(|r| r.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision() -> TickDecision {
        TickDecision {
            tick: 7,
            readings: vec![
                AngleReading { angle: AngleId(0), upper_mean: 1.0, lower_mean: 2.0, score: 7.0 },
                AngleReading { angle: AngleId(1), upper_mean: 4.0, lower_mean: 3.0, score: 13.0 },
            ],
            best_angle: AngleId(1),
            selected_angle: AngleId(0),
            switched: false,
            paused: false,
            released_frames: 1,
            evicted_frames: 0,
            buffered_frames: 0,
        }
    }

    #[test]
    fn test_held_back() {
        let d = decision();
        assert!(d.held_back());
        assert_eq!(d.selected_score(), Some(7.0));
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(decision()).unwrap();
        assert_eq!(value["tick"], 7);
        assert_eq!(value["selected_angle"], 0);
        assert_eq!(value["readings"][1]["angle"], 1);
    }
}
