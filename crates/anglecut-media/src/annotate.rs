//! Visual marking of pause footage.
//!
//! Frames withheld during a pause are marked so that, when the tail of the
//! pause is replayed, downstream consumers can tell it apart from live play.

use image::{Rgb, RgbImage};

/// Applies a visual pause marker to a frame in place.
pub trait FrameMarker<F>: Send {
    /// Mark `frame` as pause footage.
    fn mark(&self, frame: &mut F);
}

/// Solid border painted inside the frame edges.
///
/// The frame keeps its resolution, so marked and unmarked frames can be fed
/// to the same encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderMarker {
    width: u32,
    color: Rgb<u8>,
}

impl BorderMarker {
    /// Pure red, as used for pause footage by default.
    pub const PAUSE_RED: Rgb<u8> = Rgb([255, 0, 0]);

    /// Create a marker painting `width` pixels on each edge.
    pub fn new(width: u32, color: Rgb<u8>) -> Self {
        Self { width, color }
    }

    /// Red border of the given width.
    pub fn pause(width: u32) -> Self {
        Self::new(width, Self::PAUSE_RED)
    }

    /// Border width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }
}

impl FrameMarker<RgbImage> for BorderMarker {
    fn mark(&self, frame: &mut RgbImage) {
        let (w, h) = frame.dimensions();
        let bx = self.width.min(w);
        let by = self.width.min(h);

        for y in 0..h {
            let edge_row = y < by || y >= h - by;
            for x in 0..w {
                if edge_row || x < bx || x >= w - bx {
                    frame.put_pixel(x, y, self.color);
                }
            }
        }
    }
}
