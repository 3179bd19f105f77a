//! Per-tick decision core.
//!
//! The director ties the scorer, pause detector, switch controller and
//! pause buffer together behind a single synchronous `step()`. It does no
//! I/O: the host loop reads one frame and mask per angle, calls `step()`,
//! and writes whatever frames the outcome releases, in order.
//!
//! # Data Flow
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────┐
//! │ Masks (N)    │───►│ Scorer       │───►│ Switch controller│──┐
//! └──────────────┘    └──────────────┘    └──────────────────┘  │ frame
//!                            │            ┌──────────────────┐  ▼
//!                            └───────────►│ Pause detector   │─►┌──────────────┐
//!                                         └──────────────────┘  │ Pause buffer │─► output
//!                                                               └──────────────┘
//! ```

use std::sync::Arc;

use image::RgbImage;
use tracing::{debug, info, trace};

use anglecut_models::{AngleId, AngleReading, DirectorConfig, TickDecision};

use crate::annotate::{BorderMarker, FrameMarker};
use crate::error::{MediaError, MediaResult};
use crate::mask::MotionMask;
use crate::metrics;
use crate::pause::PauseDetector;
use crate::pause_buffer::PauseBuffer;
use crate::scorer::ActivityScorer;
use crate::split::SplitFactors;
use crate::switcher::{SwitchController, SwitchState};

/// One angle's contribution to a tick: its full-resolution frame and mask.
#[derive(Debug, Clone)]
pub struct AngleInput<F> {
    pub frame: F,
    pub mask: MotionMask,
}

impl<F> AngleInput<F> {
    pub fn new(frame: F, mask: MotionMask) -> Self {
        Self { frame, mask }
    }
}

/// Result of one `step()`.
#[derive(Debug)]
pub struct TickOutcome<F> {
    /// What was decided and why
    pub decision: TickDecision,
    /// Frames to hand to the output sink this tick, in order
    pub output: Vec<F>,
}

/// Angle selection and pause elision for a fixed set of angles.
pub struct Director<F> {
    config: DirectorConfig,
    scorer: ActivityScorer,
    detector: PauseDetector,
    switcher: SwitchController,
    buffer: PauseBuffer<F>,
    splits: Arc<SplitFactors>,
    marker: Option<Box<dyn FrameMarker<F>>>,
    tick: u64,
    paused: bool,
}

impl<F> Director<F> {
    /// Create a director, rejecting invalid configuration.
    pub fn new(config: DirectorConfig) -> MediaResult<Self> {
        config.validate()?;

        Ok(Self {
            scorer: ActivityScorer::from_config(&config),
            detector: PauseDetector::from_config(&config),
            switcher: SwitchController::new(config.min_wait),
            buffer: PauseBuffer::new(config.pause_end_frames),
            splits: Arc::new(SplitFactors::from_config(&config)),
            marker: None,
            tick: 0,
            paused: false,
            config,
        })
    }

    /// Mark frames entering the pause buffer with `marker`.
    pub fn with_marker<M>(mut self, marker: M) -> Self
    where
        M: FrameMarker<F> + 'static,
    {
        self.marker = Some(Box::new(marker));
        self
    }

    /// Configuration the director was built with.
    pub fn config(&self) -> &DirectorConfig {
        &self.config
    }

    /// Handle for adjusting split factors between ticks.
    pub fn split_factors(&self) -> Arc<SplitFactors> {
        Arc::clone(&self.splits)
    }

    /// Current switch controller state.
    pub fn switch_state(&self) -> SwitchState {
        self.switcher.state()
    }

    /// Frames currently withheld in the pause buffer.
    pub fn buffered_frames(&self) -> usize {
        self.buffer.len()
    }

    /// Number of ticks processed so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// Process one synchronized tick.
    ///
    /// `inputs` must hold exactly one entry per angle, in angle order, with
    /// masks of identical dimensions.
    pub fn step(&mut self, inputs: Vec<AngleInput<F>>) -> MediaResult<TickOutcome<F>> {
        self.check_inputs(&inputs)?;

        let splits = self.splits.snapshot();
        let readings: Vec<AngleReading> = inputs
            .iter()
            .zip(&splits)
            .enumerate()
            .map(|(i, (input, split))| self.scorer.score(AngleId(i), &input.mask, *split))
            .collect();
        let scores: Vec<f64> = readings.iter().map(|r| r.score).collect();
        trace!(tick = self.tick, scores = ?scores, "Angle scores");

        let choice = self.switcher.decide(&scores);
        let paused = self.config.elide_pauses && self.detector.is_paused(&readings);

        let mut frame = inputs
            .into_iter()
            .nth(choice.selected.index())
            .map(|input| input.frame)
            .ok_or(MediaError::UnknownAngle(choice.selected))?;

        let mut evicted_frames = 0;
        let output = if paused {
            if !self.paused {
                debug!("Pause detected at tick {}", self.tick);
            }
            if let Some(marker) = &self.marker {
                marker.mark(&mut frame);
            }
            evicted_frames = usize::from(self.buffer.push(frame).is_some());
            Vec::new()
        } else {
            let mut output = self.buffer.drain();
            if !output.is_empty() {
                debug!(
                    "Play resumed at tick {}, replaying {} pause frames",
                    self.tick,
                    output.len()
                );
            }
            output.push(frame);
            output
        };
        self.paused = paused;

        let decision = TickDecision {
            tick: self.tick,
            readings,
            best_angle: choice.best,
            selected_angle: choice.selected,
            switched: choice.switched,
            paused,
            released_frames: output.len(),
            evicted_frames,
            buffered_frames: self.buffer.len(),
        };
        metrics::record_tick(&decision);
        self.tick += 1;

        Ok(TickOutcome { decision, output })
    }

    /// End the run, discarding any withheld pause frames.
    ///
    /// Returns the number of frames dropped. Withheld frames are never
    /// written once the loop stops.
    pub fn finish(mut self) -> usize {
        let discarded = self.buffer.clear();
        if discarded > 0 {
            info!("Discarding {} buffered pause frames at shutdown", discarded);
        }
        metrics::record_discarded(discarded);
        discarded
    }

    fn check_inputs(&self, inputs: &[AngleInput<F>]) -> MediaResult<()> {
        if inputs.len() != self.config.angles {
            return Err(MediaError::AngleCountMismatch {
                expected: self.config.angles,
                actual: inputs.len(),
            });
        }

        let (expected_width, expected_height) = inputs[0].mask.dimensions();
        for (i, input) in inputs.iter().enumerate().skip(1) {
            let (actual_width, actual_height) = input.mask.dimensions();
            if (actual_width, actual_height) != (expected_width, expected_height) {
                return Err(MediaError::MaskSizeMismatch {
                    angle: AngleId(i),
                    expected_width,
                    expected_height,
                    actual_width,
                    actual_height,
                });
            }
        }

        Ok(())
    }
}

impl Director<RgbImage> {
    /// Install the configured red pause border, if its width is non-zero.
    pub fn with_pause_border(self) -> Self {
        match self.config.pause_border_px {
            0 => self,
            px => self.with_marker(BorderMarker::pause(px)),
        }
    }
}
