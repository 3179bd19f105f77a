//! Metrics emitted by the director.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the
//! host installs a recorder.

use metrics::{counter, gauge};

use anglecut_models::TickDecision;

/// Metric names as constants for consistency.
pub mod names {
    pub const TICKS_TOTAL: &str = "anglecut_ticks_total";
    pub const SWITCHES_TOTAL: &str = "anglecut_switches_total";
    pub const HELD_TICKS_TOTAL: &str = "anglecut_held_ticks_total";
    pub const PAUSE_TICKS_TOTAL: &str = "anglecut_pause_ticks_total";
    pub const FRAMES_RELEASED_TOTAL: &str = "anglecut_frames_released_total";
    pub const PAUSE_FRAMES_EVICTED_TOTAL: &str = "anglecut_pause_frames_evicted_total";
    pub const PAUSE_FRAMES_DISCARDED_TOTAL: &str = "anglecut_pause_frames_discarded_total";
    pub const PAUSE_BUFFER_DEPTH: &str = "anglecut_pause_buffer_depth";
    pub const ACTIVITY_SCORE: &str = "anglecut_activity_score";
}

/// Record everything observable about one tick.
pub fn record_tick(decision: &TickDecision) {
    counter!(names::TICKS_TOTAL).increment(1);

    if decision.switched {
        let labels = [("to_angle", decision.selected_angle.to_string())];
        counter!(names::SWITCHES_TOTAL, &labels).increment(1);
    } else if decision.held_back() {
        counter!(names::HELD_TICKS_TOTAL).increment(1);
    }

    if decision.paused {
        counter!(names::PAUSE_TICKS_TOTAL).increment(1);
    }
    if decision.evicted_frames > 0 {
        counter!(names::PAUSE_FRAMES_EVICTED_TOTAL).increment(decision.evicted_frames as u64);
    }

    counter!(names::FRAMES_RELEASED_TOTAL).increment(decision.released_frames as u64);
    gauge!(names::PAUSE_BUFFER_DEPTH).set(decision.buffered_frames as f64);

    for reading in &decision.readings {
        let labels = [("angle", reading.angle.to_string())];
        gauge!(names::ACTIVITY_SCORE, &labels).set(reading.score);
    }
}

/// Record pause frames dropped at shutdown.
pub fn record_discarded(frames: usize) {
    counter!(names::PAUSE_FRAMES_DISCARDED_TOTAL).increment(frames as u64);
    gauge!(names::PAUSE_BUFFER_DEPTH).set(0.0);
}
