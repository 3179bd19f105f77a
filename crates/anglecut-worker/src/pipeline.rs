//! Wires the director to image-sequence sources and sinks.
//!
//! Each angle directory either holds `frames/` and `masks/` directly, or
//! one subdirectory per recorded clip (each with its own `frames/` and
//! `masks/`) played back in name order.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use tracing::{debug, info};

use anglecut_media::{
    run_director_with, CancellationSignal, ChainedSource, Director, FrameSource,
    ImageSequenceSink, ImageSequenceSource, MediaError, RunSummary,
};
use anglecut_models::AngleId;

use crate::config::WorkerConfig;
use crate::decision_log::DecisionLog;
use crate::error::WorkerResult;
use crate::logging::RunLogger;

/// Source type used for every angle.
pub type AngleSource = ChainedSource<ImageSequenceSource>;

/// Open every angle's clips and skip to the configured start frame.
///
/// An angle shorter than the start frame is kept, exhausted, and ends the
/// run on its first tick.
pub fn open_sources(config: &WorkerConfig, logger: &RunLogger) -> WorkerResult<Vec<AngleSource>> {
    let director = &config.director;
    let mut sources = Vec::with_capacity(director.angles);

    for index in 0..director.angles {
        let angle = AngleId(index);
        let dir = config.angle_dir(index);
        let clips = clip_dirs(angle, &dir)?
            .into_iter()
            .map(|clip| {
                ImageSequenceSource::open(angle, clip).map(|source| {
                    source.with_analysis_size(director.analysis_width, director.analysis_height)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Angle {} has {} clip(s) in {}", angle, clips.len(), dir.display());

        let mut source = ChainedSource::new(format!("angle {}", angle), clips);
        if config.start_frame > 0 {
            let skipped = source.skip(config.start_frame)?;
            if skipped < config.start_frame {
                logger.log_warning(&format!(
                    "Start frame {} is past the end of angle {} ({} ticks)",
                    config.start_frame, angle, skipped
                ));
            } else {
                debug!("Skipped {} ticks on angle {}", skipped, angle);
            }
        }
        sources.push(source);
    }

    Ok(sources)
}

/// Clip directories for one angle, in playback order.
pub fn clip_dirs(angle: AngleId, dir: &Path) -> WorkerResult<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(MediaError::source_open(angle, format!("{} not found", dir.display())).into());
    }
    if dir.join("frames").is_dir() {
        return Ok(vec![dir.to_path_buf()]);
    }

    let mut clips = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.join("frames").is_dir() {
            clips.push(path);
        }
    }
    if clips.is_empty() {
        return Err(MediaError::source_open(
            angle,
            format!("{} holds no frames/ directory or clip subdirectories", dir.display()),
        )
        .into());
    }
    clips.sort();
    Ok(clips)
}

/// Run the director over the configured recording until it ends or
/// `cancel` trips.
pub fn run<C>(config: &WorkerConfig, cancel: &C, logger: &RunLogger) -> WorkerResult<RunSummary>
where
    C: CancellationSignal + ?Sized,
{
    let director = Director::<RgbImage>::new(config.director.clone())?.with_pause_border();
    let mut sources = open_sources(config, logger)?;
    let mut sink = ImageSequenceSink::create(&config.output_dir)?;
    let mut decision_log = config
        .decision_log
        .as_ref()
        .map(DecisionLog::create)
        .transpose()?;

    logger.log_start(&format!(
        "{} angles from {} into {}",
        config.director.angles,
        config.input_dir.display(),
        config.output_dir.display()
    ));
    if config.director.elide_pauses {
        logger.log_progress(&format!(
            "Pause elision on, keeping the last {} pause frames",
            config.director.pause_end_frames
        ));
    }

    let summary = run_director_with(director, &mut sources, &mut sink, cancel, |decision| {
        if let Some(log) = decision_log.as_mut() {
            log.record(decision)?;
        }
        Ok(())
    })?;

    if let Some(log) = decision_log {
        let records = log.records();
        log.into_inner()?;
        info!("Wrote {} decisions", records);
    }
    logger.log_summary(&summary);

    Ok(summary)
}
