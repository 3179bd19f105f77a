//! Motion masks at analysis resolution.
//!
//! A mask is the per-pixel foreground activity of one angle for one tick,
//! as produced by an external background subtractor (0 = static, 255 =
//! moving, intermediate values for shadows or soft edges).

use image::GrayImage;
use ndarray::{s, Array2, ArrayView2};

use anglecut_models::SplitFactor;

use crate::error::{MediaError, MediaResult};

/// Foreground activity grid for one angle and one tick.
///
/// Never empty: every constructor rejects zero-sized input.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionMask {
    data: Array2<u8>,
}

/// Mean intensity of the two regions of a mask.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RegionMeans {
    /// Rows above the split
    pub upper: f64,
    /// Rows at and below the split
    pub lower: f64,
}

impl MotionMask {
    /// Wrap a `rows x cols` array.
    pub fn new(data: Array2<u8>) -> MediaResult<Self> {
        if data.is_empty() {
            return Err(MediaError::malformed_mask(format!(
                "mask has zero size ({}x{})",
                data.ncols(),
                data.nrows()
            )));
        }
        Ok(Self { data })
    }

    /// Build a mask from row-major pixels.
    pub fn from_raw(width: usize, height: usize, pixels: Vec<u8>) -> MediaResult<Self> {
        if width * height != pixels.len() {
            return Err(MediaError::malformed_mask(format!(
                "{} pixels do not fill a {}x{} mask",
                pixels.len(),
                width,
                height
            )));
        }
        let data = Array2::from_shape_vec((height, width), pixels)
            .map_err(|e| MediaError::malformed_mask(e.to_string()))?;
        Self::new(data)
    }

    /// Build a mask by evaluating `f(row, col)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, f: F) -> MediaResult<Self>
    where
        F: FnMut((usize, usize)) -> u8,
    {
        Self::new(Array2::from_shape_fn((height, width), f))
    }

    /// Build a mask with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: u8) -> MediaResult<Self> {
        Self::new(Array2::from_elem((height, width), value))
    }

    /// Take ownership of a grayscale image as a mask.
    pub fn from_gray_image(image: GrayImage) -> MediaResult<Self> {
        let (width, height) = image.dimensions();
        Self::from_raw(width as usize, height as usize, image.into_raw())
    }

    /// Mask width in pixels.
    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    /// Mask height in pixels.
    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// `(width, height)` of the mask.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Borrow the underlying pixels.
    pub fn view(&self) -> ArrayView2<'_, u8> {
        self.data.view()
    }

    /// Mean intensity above and below the split row.
    ///
    /// A region with no rows has a mean of 0.
    pub fn region_means(&self, split: SplitFactor) -> RegionMeans {
        let row = split.split_row(self.height());
        RegionMeans {
            upper: mean(self.data.slice(s![..row, ..])),
            lower: mean(self.data.slice(s![row.., ..])),
        }
    }
}

fn mean(region: ArrayView2<'_, u8>) -> f64 {
    if region.is_empty() {
        return 0.0;
    }
    let total: u64 = region.iter().map(|&v| u64::from(v)).sum();
    total as f64 / region.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(value: f64) -> SplitFactor {
        SplitFactor::new(value).unwrap()
    }

    #[test]
    fn test_rejects_zero_size() {
        assert!(matches!(
            MotionMask::filled(0, 10, 0),
            Err(MediaError::MalformedMask(_))
        ));
        assert!(MotionMask::from_raw(4, 0, Vec::new()).is_err());
    }

    #[test]
    fn test_rejects_short_buffer() {
        assert!(MotionMask::from_raw(4, 4, vec![0; 15]).is_err());
    }

    #[test]
    fn test_region_means_split_rows() {
        // Top half 0, bottom half 200
        let mask = MotionMask::from_fn(8, 10, |(row, _)| if row < 5 { 0 } else { 200 }).unwrap();
        let means = mask.region_means(split(0.5));
        assert_eq!(means.upper, 0.0);
        assert_eq!(means.lower, 200.0);

        // Raising the split dilutes the lower region with idle rows
        let means = mask.region_means(split(0.3));
        assert_eq!(means.upper, 0.0);
        assert!((means.lower - 200.0 * 5.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_upper_region_is_zero() {
        let mask = MotionMask::filled(3, 1, 90).unwrap();
        let means = mask.region_means(split(0.5));
        assert_eq!(means.upper, 0.0);
        assert_eq!(means.lower, 90.0);
    }

    #[test]
    fn test_from_gray_image_keeps_layout() {
        let mut image = GrayImage::new(2, 3);
        image.put_pixel(1, 2, image::Luma([255]));
        let mask = MotionMask::from_gray_image(image).unwrap();
        assert_eq!(mask.dimensions(), (2, 3));
        assert_eq!(mask.view()[[2, 1]], 255);
    }
}
