//! Worker configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anglecut_models::{ConfigError, ConfigResult, DirectorConfig, SplitFactor};

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Directory holding one subdirectory per angle
    pub input_dir: PathBuf,
    /// Angle `i` is read from `<input_dir>/<angle_prefix><i>`
    pub angle_prefix: String,
    /// Directory receiving the numbered output frames
    pub output_dir: PathBuf,
    /// Ticks skipped on every angle before directing starts
    pub start_frame: u64,
    /// Optional JSON Lines file receiving every tick decision
    pub decision_log: Option<PathBuf>,
    /// Optional Prometheus listener address
    pub metrics_addr: Option<SocketAddr>,
    /// Decision core settings
    pub director: DirectorConfig,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            angle_prefix: "angle".to_string(),
            output_dir: PathBuf::from("out"),
            start_frame: 0,
            decision_log: None,
            metrics_addr: None,
            director: DirectorConfig::default(),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    ///
    /// Unset keys keep their defaults; set but unparseable keys are errors.
    pub fn from_lookup<L>(lookup: L) -> ConfigResult<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mut director = match parse::<usize, _>(&lookup, "ANGLECUT_ANGLES")? {
            Some(angles) => DirectorConfig::for_angles(angles),
            None => DirectorConfig::default(),
        };
        if let Some(min_wait) = parse(&lookup, "ANGLECUT_MIN_WAIT")? {
            director = director.with_min_wait(min_wait);
        }
        if let Some(weight) = parse(&lookup, "ANGLECUT_LOWER_WEIGHT")? {
            director = director.with_lower_weight(weight);
        }
        let lower = parse(&lookup, "ANGLECUT_LOWER_THRESH")?.unwrap_or(director.lower_thresh);
        let upper = parse(&lookup, "ANGLECUT_UPPER_THRESH")?.unwrap_or(director.upper_thresh);
        director = director.with_thresholds(lower, upper);
        if let Some(frames) = parse(&lookup, "ANGLECUT_PAUSE_END_FRAMES")? {
            director = director.with_pause_end_frames(frames);
        }
        if let Some(enabled) = parse_flag(&lookup, "ANGLECUT_ELIDE_PAUSES")? {
            director = director.with_pause_elision(enabled);
        }
        if let Some(raw) = lookup("ANGLECUT_SPLIT_FACTORS") {
            director = director.with_split_factors(parse_splits(&raw)?);
        }
        director.validate()?;

        let metrics_addr = parse(&lookup, "METRICS_ADDR")?;

        Ok(Self {
            input_dir: lookup("ANGLECUT_INPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.input_dir),
            angle_prefix: lookup("ANGLECUT_ANGLE_PREFIX").unwrap_or(defaults.angle_prefix),
            output_dir: lookup("ANGLECUT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            start_frame: parse(&lookup, "ANGLECUT_START_FRAME")?.unwrap_or(defaults.start_frame),
            decision_log: lookup("ANGLECUT_DECISION_LOG")
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            metrics_addr,
            director,
        })
    }

    /// Directory holding angle `index`.
    pub fn angle_dir(&self, index: usize) -> PathBuf {
        self.input_dir
            .join(format!("{}{}", self.angle_prefix, index))
    }
}

fn parse<T, L>(lookup: &L, key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    L: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::invalid_value(key, raw)),
    }
}

fn parse_flag<L>(lookup: &L, key: &str) -> ConfigResult<Option<bool>>
where
    L: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::invalid_value(key, raw)),
        },
    }
}

fn parse_splits(raw: &str) -> ConfigResult<Vec<SplitFactor>> {
    raw.split(',')
        .map(|part| {
            let value: f64 = part
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_value("ANGLECUT_SPLIT_FACTORS", raw))?;
            SplitFactor::new(value)
        })
        .collect()
}
