//! Host loop driving a director from real sources.
//!
//! Strictly sequential: each tick polls cancellation, then performs one
//! blocking read per angle in angle order, then steps the director and
//! writes the released frames. The loop ends on cancellation or as soon as
//! any angle runs out of frames. Frames still withheld in the pause buffer
//! at that point are dropped.

use serde::Serialize;
use tracing::info;

use anglecut_models::{AngleId, TickDecision};

use crate::director::{AngleInput, Director};
use crate::error::{MediaError, MediaResult};
use crate::source::{CancellationSignal, FrameSource, OutputSink};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// An angle's source returned end-of-stream
    SourceExhausted { angle: AngleId },
    /// The cancellation signal tripped
    Cancelled,
}

/// Totals for a finished run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames_written: u64,
    pub switches: u64,
    pub pause_ticks: u64,
    pub evicted_frames: u64,
    pub discarded_pause_frames: usize,
    pub stop_reason: StopReason,
}

/// Run `director` until a source is exhausted or `cancel` trips.
pub fn run_director<F, S, O, C>(
    director: Director<F>,
    sources: &mut [S],
    sink: &mut O,
    cancel: &C,
) -> MediaResult<RunSummary>
where
    S: FrameSource<F>,
    O: OutputSink<F>,
    C: CancellationSignal + ?Sized,
{
    run_director_with(director, sources, sink, cancel, |_| Ok(()))
}

/// Like [`run_director`], calling `observer` with every tick's decision.
pub fn run_director_with<F, S, O, C, Obs>(
    mut director: Director<F>,
    sources: &mut [S],
    sink: &mut O,
    cancel: &C,
    mut observer: Obs,
) -> MediaResult<RunSummary>
where
    S: FrameSource<F>,
    O: OutputSink<F>,
    C: CancellationSignal + ?Sized,
    Obs: FnMut(&TickDecision) -> MediaResult<()>,
{
    let angles = director.config().angles;
    if sources.len() != angles {
        return Err(MediaError::AngleCountMismatch {
            expected: angles,
            actual: sources.len(),
        });
    }

    info!("Directing {} angles", angles);

    let mut frames_written = 0u64;
    let mut switches = 0u64;
    let mut pause_ticks = 0u64;
    let mut evicted_frames = 0u64;

    let stop_reason = 'ticks: loop {
        if cancel.is_cancelled() {
            info!("Cancelled after {} ticks", director.ticks());
            break StopReason::Cancelled;
        }

        let mut inputs = Vec::with_capacity(angles);
        for (i, source) in sources.iter_mut().enumerate() {
            match source.next_tick()? {
                Some((frame, mask)) => inputs.push(AngleInput::new(frame, mask)),
                None => {
                    info!("No more frames in angle {}", i);
                    break 'ticks StopReason::SourceExhausted { angle: AngleId(i) };
                }
            }
        }

        let outcome = director.step(inputs)?;
        observer(&outcome.decision)?;

        let decision = &outcome.decision;
        switches += u64::from(decision.switched);
        pause_ticks += u64::from(decision.paused);
        evicted_frames += decision.evicted_frames as u64;

        for frame in outcome.output {
            sink.write(frame)?;
            frames_written += 1;
        }
    };

    let ticks = director.ticks();
    let discarded_pause_frames = director.finish();

    let summary = RunSummary {
        ticks,
        frames_written,
        switches,
        pause_ticks,
        evicted_frames,
        discarded_pause_frames,
        stop_reason,
    };
    info!(
        ticks = summary.ticks,
        frames_written = summary.frames_written,
        switches = summary.switches,
        "Run finished: {:?}",
        summary.stop_reason
    );
    Ok(summary)
}
