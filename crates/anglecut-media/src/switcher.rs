//! Hysteresis-based angle switching.
//!
//! The controller follows the highest scoring angle but, once it has
//! switched, stays put for at least `min_wait` ticks. Without the dwell
//! time two angles with similar activity make the output flicker.
//!
//! # State Machine
//!
//! ```text
//!                 best != active && allowed
//!     ┌───────────────────────────────────────────┐
//!     │                                           ▼
//! ┌─────────┐   ticks_since_switch > min_wait ┌────────┐
//! │ Allowed │◄────────────────────────────────│ Locked │
//! └─────────┘                                 └────────┘
//! ```

use tracing::debug;

use anglecut_models::AngleId;

/// Mutable state of the switch controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchState {
    /// Angle currently on air, unset before the first tick
    pub active_angle: Option<AngleId>,
    /// Whether the next decision may change the active angle
    pub switch_allowed: bool,
    /// Ticks elapsed since the last switch
    pub ticks_since_switch: u32,
}

impl Default for SwitchState {
    fn default() -> Self {
        Self {
            active_angle: None,
            switch_allowed: true,
            ticks_since_switch: 0,
        }
    }
}

/// Result of one switching decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchDecision {
    /// Highest scoring angle
    pub best: AngleId,
    /// Angle whose frame should be emitted
    pub selected: AngleId,
    /// Whether the active angle changed
    pub switched: bool,
}

/// Picks the active angle per tick, enforcing a minimum dwell time.
#[derive(Debug, Clone)]
pub struct SwitchController {
    state: SwitchState,
    min_wait: u32,
}

impl SwitchController {
    /// Create a controller with the given dwell time in ticks.
    pub fn new(min_wait: u32) -> Self {
        Self {
            state: SwitchState::default(),
            min_wait,
        }
    }

    /// Current state.
    pub fn state(&self) -> SwitchState {
        self.state
    }

    /// Currently active angle.
    pub fn active_angle(&self) -> Option<AngleId> {
        self.state.active_angle
    }

    /// Dwell time in ticks.
    pub fn min_wait(&self) -> u32 {
        self.min_wait
    }

    /// Decide which angle to emit for one tick.
    ///
    /// `scores` are indexed by angle.
    pub fn decide(&mut self, scores: &[f64]) -> SwitchDecision {
        let best = best_angle(scores);

        let active = self.state.active_angle;
        let decision = match active {
            Some(active) if active == best => SwitchDecision {
                best,
                selected: best,
                switched: false,
            },
            // Locked out: stay on the current angle
            Some(active) if !self.state.switch_allowed => SwitchDecision {
                best,
                selected: active,
                switched: false,
            },
            // Unlocked, or no angle on air yet
            previous => {
                match previous {
                    Some(from) => debug!("Switching angle {} -> {}", from, best),
                    None => debug!("Initial angle selection: {}", best),
                }
                self.state.active_angle = Some(best);
                self.state.switch_allowed = false;
                self.state.ticks_since_switch = 0;
                SwitchDecision {
                    best,
                    selected: best,
                    switched: true,
                }
            }
        };

        self.state.ticks_since_switch = self.state.ticks_since_switch.saturating_add(1);
        if !self.state.switch_allowed && self.state.ticks_since_switch > self.min_wait {
            self.state.switch_allowed = true;
        }

        decision
    }

    /// Forget the active angle and unlock switching.
    pub fn reset(&mut self) {
        self.state = SwitchState::default();
    }
}

/// Index of the highest score; ties and empty input resolve to the lowest angle.
///
/// NaN never beats a real score.
pub fn best_angle(scores: &[f64]) -> AngleId {
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] || (scores[best].is_nan() && !score.is_nan()) {
            best = i;
        }
    }
    AngleId(best)
}
