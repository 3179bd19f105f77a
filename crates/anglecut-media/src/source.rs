//! Collaborator interfaces: frame/mask sources, output sinks, cancellation.
//!
//! The director never blocks on I/O itself. Decoding, background
//! subtraction and encoding live behind these traits so the host loop can
//! pull one tick from every angle, step, and push the result.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::MediaResult;
use crate::mask::MotionMask;

/// Pull-based source of `(frame, mask)` pairs for one angle.
pub trait FrameSource<F> {
    /// Read the next tick, or `None` once the stream is exhausted.
    fn next_tick(&mut self) -> MediaResult<Option<(F, MotionMask)>>;

    /// Drop the next `ticks` ticks, returning how many were actually skipped.
    fn skip(&mut self, ticks: u64) -> MediaResult<u64> {
        for skipped in 0..ticks {
            if self.next_tick()?.is_none() {
                return Ok(skipped);
            }
        }
        Ok(ticks)
    }
}

impl<F, S> FrameSource<F> for Box<S>
where
    S: FrameSource<F> + ?Sized,
{
    fn next_tick(&mut self) -> MediaResult<Option<(F, MotionMask)>> {
        (**self).next_tick()
    }

    fn skip(&mut self, ticks: u64) -> MediaResult<u64> {
        (**self).skip(ticks)
    }
}

/// Push-based consumer of output frames. Must preserve submission order.
pub trait OutputSink<F> {
    /// Persist or forward one frame.
    fn write(&mut self, frame: F) -> MediaResult<()>;
}

/// Poll-style stop signal checked once per tick.
pub trait CancellationSignal {
    /// Whether the loop should stop before the next read.
    fn is_cancelled(&self) -> bool;
}

impl CancellationSignal for watch::Receiver<bool> {
    fn is_cancelled(&self) -> bool {
        *self.borrow()
    }
}

impl CancellationSignal for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: CancellationSignal + ?Sized> CancellationSignal for Arc<T> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<T: CancellationSignal + ?Sized> CancellationSignal for &T {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

/// Signal that never trips.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancellationSignal for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// In-memory source replaying a fixed list of ticks.
#[derive(Debug, Clone)]
pub struct MemorySource<F> {
    ticks: VecDeque<(F, MotionMask)>,
}

impl<F> MemorySource<F> {
    pub fn new(ticks: impl IntoIterator<Item = (F, MotionMask)>) -> Self {
        Self {
            ticks: ticks.into_iter().collect(),
        }
    }

    /// Ticks left to read.
    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }
}

impl<F> FrameSource<F> for MemorySource<F> {
    fn next_tick(&mut self) -> MediaResult<Option<(F, MotionMask)>> {
        Ok(self.ticks.pop_front())
    }
}

/// Several clips of one angle played back to back.
///
/// Long recordings are often split into numbered clips by the camera; the
/// chain moves to the next clip when the current one runs out.
pub struct ChainedSource<S> {
    clips: VecDeque<S>,
    label: String,
    clip_index: usize,
}

impl<S> ChainedSource<S> {
    /// Chain `clips` in order. `label` names the angle in log output.
    pub fn new(label: impl Into<String>, clips: impl IntoIterator<Item = S>) -> Self {
        Self {
            clips: clips.into_iter().collect(),
            label: label.into(),
            clip_index: 0,
        }
    }

    /// Clips not yet exhausted, including the current one.
    pub fn remaining_clips(&self) -> usize {
        self.clips.len()
    }
}

impl<F, S: FrameSource<F>> FrameSource<F> for ChainedSource<S> {
    fn next_tick(&mut self) -> MediaResult<Option<(F, MotionMask)>> {
        while let Some(clip) = self.clips.front_mut() {
            if let Some(tick) = clip.next_tick()? {
                return Ok(Some(tick));
            }
            self.clips.pop_front();
            self.clip_index += 1;
            if self.clips.is_empty() {
                info!("No more clips for {}", self.label);
            } else {
                info!("Switching {} to clip {}", self.label, self.clip_index + 1);
            }
        }
        Ok(None)
    }

    fn skip(&mut self, ticks: u64) -> MediaResult<u64> {
        let mut skipped = 0;
        while skipped < ticks {
            let Some(clip) = self.clips.front_mut() else {
                break;
            };
            let remaining = ticks - skipped;
            let done = clip.skip(remaining)?;
            skipped += done;
            if done < remaining {
                self.clips.pop_front();
                self.clip_index += 1;
                debug!("Skipped past the end of clip {} for {}", self.clip_index, self.label);
            }
        }
        Ok(skipped)
    }
}

/// Sink collecting frames in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink<F> {
    frames: Vec<F>,
}

impl<F> CollectingSink<F> {
    pub fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Frames written so far, in order.
    pub fn frames(&self) -> &[F] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<F> {
        self.frames
    }
}

impl<F> OutputSink<F> for CollectingSink<F> {
    fn write(&mut self, frame: F) -> MediaResult<()> {
        self.frames.push(frame);
        Ok(())
    }
}
