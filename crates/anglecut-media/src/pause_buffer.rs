//! Bounded lookback buffer for pause footage.
//!
//! Pause detection lags the game: by the time every mask has dropped below
//! threshold, and again by the time activity reappears, play has already
//! moved on. Holding the last `capacity` pause frames and replaying them
//! when play resumes keeps the restart in the output without a second pass
//! over the source.

use std::collections::VecDeque;

/// FIFO of withheld frames with oldest-first eviction.
#[derive(Debug, Clone)]
pub struct PauseBuffer<F> {
    frames: VecDeque<F>,
    capacity: usize,
}

impl<F> PauseBuffer<F> {
    /// Create an empty buffer holding at most `capacity` frames.
    pub fn new(capacity: usize) -> Self {
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a frame, returning the oldest frame if it had to be evicted.
    pub fn push(&mut self, frame: F) -> Option<F> {
        self.frames.push_back(frame);
        if self.frames.len() > self.capacity {
            self.frames.pop_front()
        } else {
            None
        }
    }

    /// Remove and return every buffered frame, oldest first.
    pub fn drain(&mut self) -> Vec<F> {
        self.frames.drain(..).collect()
    }

    /// Drop every buffered frame, returning how many were discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.frames.len();
        self.frames.clear();
        discarded
    }

    /// Number of buffered frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the buffer holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Maximum number of frames held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate over buffered frames, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &F> {
        self.frames.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_last_frames_of_long_pause() {
        let mut buffer = PauseBuffer::new(3);
        let mut evicted = Vec::new();
        for frame in 1..=5 {
            evicted.extend(buffer.push(frame));
            assert!(buffer.len() <= buffer.capacity());
        }
        assert_eq!(evicted, vec![1, 2]);
        assert_eq!(buffer.drain(), vec![3, 4, 5]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_zero_capacity_holds_nothing() {
        let mut buffer = PauseBuffer::new(0);
        assert_eq!(buffer.push("a"), Some("a"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_clear_reports_discarded() {
        let mut buffer = PauseBuffer::new(4);
        buffer.push(1);
        buffer.push(2);
        assert_eq!(buffer.clear(), 2);
        assert!(buffer.drain().is_empty());
    }
}
