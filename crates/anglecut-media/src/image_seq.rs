//! Image-sequence sources and sinks.
//!
//! Decoding and background subtraction happen upstream; this module reads
//! what they produced from disk. Each angle directory holds two sequences
//! sorted by file name:
//!
//! ```text
//! <angle dir>/
//!   frames/000001.png ...   full-resolution frames
//!   masks/000001.png  ...   foreground masks (any size, converted to luma)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbImage;
use tracing::{debug, warn};

use anglecut_models::AngleId;

use crate::error::{MediaError, MediaResult};
use crate::mask::MotionMask;
use crate::source::{FrameSource, OutputSink};

const FRAMES_DIR: &str = "frames";
const MASKS_DIR: &str = "masks";
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Reads one angle's frames and masks from an image-sequence directory.
#[derive(Debug, Clone)]
pub struct ImageSequenceSource {
    angle: AngleId,
    frames: Vec<PathBuf>,
    masks: Vec<PathBuf>,
    position: usize,
    analysis_size: Option<(u32, u32)>,
}

impl ImageSequenceSource {
    /// Open the `frames/` and `masks/` sequences below `dir`.
    pub fn open(angle: AngleId, dir: impl AsRef<Path>) -> MediaResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(MediaError::source_open(
                angle,
                format!("{} is not a directory", dir.display()),
            ));
        }

        let frames = list_images(angle, &dir.join(FRAMES_DIR))?;
        let masks = list_images(angle, &dir.join(MASKS_DIR))?;
        if frames.len() != masks.len() {
            warn!(
                "Angle {} has {} frames but {} masks, using the shorter sequence",
                angle,
                frames.len(),
                masks.len()
            );
        }
        debug!("Opened angle {} at {} ({} ticks)", angle, dir.display(), frames.len().min(masks.len()));

        Ok(Self {
            angle,
            frames,
            masks,
            position: 0,
            analysis_size: None,
        })
    }

    /// Resize masks that are not `width x height` to that size.
    pub fn with_analysis_size(mut self, width: u32, height: u32) -> Self {
        self.analysis_size = Some((width, height));
        self
    }

    /// Total ticks in the sequence.
    pub fn len(&self) -> usize {
        self.frames.len().min(self.masks.len())
    }

    /// Whether the sequence has no ticks.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Angle this source feeds.
    pub fn angle(&self) -> AngleId {
        self.angle
    }

    fn load_mask(&self, path: &Path) -> MediaResult<MotionMask> {
        let mut mask = image::open(path)?.to_luma8();
        if let Some((width, height)) = self.analysis_size {
            if mask.dimensions() != (width, height) {
                mask = imageops::resize(&mask, width, height, FilterType::Triangle);
            }
        }
        MotionMask::from_gray_image(mask)
    }
}

impl FrameSource<RgbImage> for ImageSequenceSource {
    fn next_tick(&mut self) -> MediaResult<Option<(RgbImage, MotionMask)>> {
        if self.position >= self.len() {
            return Ok(None);
        }

        let frame = image::open(&self.frames[self.position])?.to_rgb8();
        let mask = self.load_mask(&self.masks[self.position])?;
        self.position += 1;
        Ok(Some((frame, mask)))
    }

    fn skip(&mut self, ticks: u64) -> MediaResult<u64> {
        let available = (self.len() - self.position) as u64;
        let skipped = ticks.min(available);
        self.position += skipped as usize;
        Ok(skipped)
    }
}

fn list_images(angle: AngleId, dir: &Path) -> MediaResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| {
        MediaError::source_open(angle, format!("cannot read {}: {}", dir.display(), e))
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if is_image {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Writes output frames as a numbered PNG sequence.
#[derive(Debug)]
pub struct ImageSequenceSink {
    dir: PathBuf,
    next_index: u64,
}

impl ImageSequenceSink {
    /// Create `dir` if needed and write frames into it starting at 000000.png.
    pub fn create(dir: impl Into<PathBuf>) -> MediaResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, next_index: 0 })
    }

    /// Number of frames written.
    pub fn written(&self) -> u64 {
        self.next_index
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl OutputSink<RgbImage> for ImageSequenceSink {
    fn write(&mut self, frame: RgbImage) -> MediaResult<()> {
        let path = self.dir.join(format!("{:06}.png", self.next_index));
        frame.save(&path)?;
        self.next_index += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb};
    use tempfile::TempDir;

    fn write_angle(root: &Path, ticks: u8, mask_size: (u32, u32)) -> PathBuf {
        let dir = root.join("angle0");
        fs::create_dir_all(dir.join(FRAMES_DIR)).unwrap();
        fs::create_dir_all(dir.join(MASKS_DIR)).unwrap();
        for i in 0..ticks {
            RgbImage::from_pixel(8, 6, Rgb([i, 0, 0]))
                .save(dir.join(FRAMES_DIR).join(format!("{:04}.png", i)))
                .unwrap();
            GrayImage::from_pixel(mask_size.0, mask_size.1, Luma([i * 10]))
                .save(dir.join(MASKS_DIR).join(format!("{:04}.png", i)))
                .unwrap();
        }
        // Non-image files are ignored
        fs::write(dir.join(FRAMES_DIR).join("notes.txt"), "x").unwrap();
        dir
    }

    #[test]
    fn test_reads_in_name_order() {
        let tmp = TempDir::new().unwrap();
        let dir = write_angle(tmp.path(), 3, (4, 3));
        let mut source = ImageSequenceSource::open(AngleId(0), &dir).unwrap();
        assert_eq!(source.len(), 3);

        let mut reds = Vec::new();
        while let Some((frame, mask)) = source.next_tick().unwrap() {
            reds.push(frame.get_pixel(0, 0)[0]);
            assert_eq!(mask.dimensions(), (4, 3));
        }
        assert_eq!(reds, vec![0, 1, 2]);
    }

    #[test]
    fn test_resizes_masks_to_analysis_size() {
        let tmp = TempDir::new().unwrap();
        let dir = write_angle(tmp.path(), 1, (16, 12));
        let mut source = ImageSequenceSource::open(AngleId(0), &dir)
            .unwrap()
            .with_analysis_size(8, 6);
        let (_, mask) = source.next_tick().unwrap().unwrap();
        assert_eq!(mask.dimensions(), (8, 6));
    }

    #[test]
    fn test_skip_without_decoding() {
        let tmp = TempDir::new().unwrap();
        let dir = write_angle(tmp.path(), 4, (4, 3));
        let mut source = ImageSequenceSource::open(AngleId(0), &dir).unwrap();
        assert_eq!(source.skip(3).unwrap(), 3);
        let (frame, _) = source.next_tick().unwrap().unwrap();
        assert_eq!(frame.get_pixel(0, 0)[0], 3);
        assert_eq!(source.skip(10).unwrap(), 0);
    }

    #[test]
    fn test_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let result = ImageSequenceSource::open(AngleId(2), tmp.path().join("nope"));
        assert!(matches!(
            result,
            Err(MediaError::SourceOpen { angle: AngleId(2), .. })
        ));
    }

    #[test]
    fn test_sink_numbers_frames() {
        let tmp = TempDir::new().unwrap();
        let mut sink = ImageSequenceSink::create(tmp.path().join("out")).unwrap();
        sink.write(RgbImage::new(4, 4)).unwrap();
        sink.write(RgbImage::new(4, 4)).unwrap();
        assert_eq!(sink.written(), 2);
        assert!(sink.dir().join("000000.png").exists());
        assert!(sink.dir().join("000001.png").exists());
    }
}
