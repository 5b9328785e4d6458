//! Validated, typed configuration for a [`crate::engine::DopplerSpeedEngine`].
//!
//! Replaces the parameter-map / descriptor-list surface a plug-in host would
//! otherwise need (out of scope here, see the specification's OUT OF SCOPE
//! list) with a plain struct that fails fast, once, at construction.

use std::path::PathBuf;

use crate::error::EngineError;

/// Recognized parameter ids, for callers that only know a parameter by
/// string at runtime (e.g. replaying a saved preset). Prefer the typed
/// `with_*` builder methods when the parameter is known at compile time.
pub const PEAK_DETECTION_TIME_ID: &str = "peak-detection-time";
pub const PEAK_DETECTION_HEIGHT_THRESHOLD_ID: &str = "peak-detection-height-threshold";
pub const PEAK_TRACING_HEIGHT_THRESHOLD_ID: &str = "peak-tracing-height-threshold";
pub const UPPER_THRESHOLD_FREQUENCY_ID: &str = "upper-threshold-frequency";
pub const MAX_BIN_JUMP_ID: &str = "max-bin-jump";
pub const BROADEST_INTERRUPTION_ID: &str = "broadest-interruption";
pub const MOVING_FFT_AVERAGE_WIDTH_ID: &str = "moving-fft-average-width";
pub const RESCUE_WINDOW_BEGIN_SECONDS_ID: &str = "rescue-window-begin-seconds";
pub const RESCUE_WINDOW_END_SECONDS_ID: &str = "rescue-window-end-seconds";
pub const STABLE_RUN_MINIMUM_ID: &str = "stable-run-minimum";

const MIN_CHANNEL_COUNT: usize = 1;
const MAX_CHANNEL_COUNT: usize = 1;

/// Validated engine configuration. Construct with [`EngineConfig::new`],
/// then optionally override individual parameters with the `with_*`
/// builder methods (all of which take `self` by value, beat-detector style).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub sample_rate: f64,
    pub step_size: usize,
    pub block_size: usize,
    pub channels: usize,

    pub peak_detection_time: f64,
    pub peak_detection_height_threshold: f32,
    pub peak_tracing_height_threshold: f32,
    pub upper_threshold_frequency: f64,
    pub max_bin_jump: usize,
    pub broadest_allowed_interruption: usize,
    pub moving_fft_average_width: usize,
    pub rescue_window_begin_seconds: f64,
    pub rescue_window_end_seconds: f64,
    pub stable_run_minimum: usize,
    pub write_debug_csv: bool,
    pub debug_csv_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Default window during which new tracks may be admitted, in seconds.
    pub const DEFAULT_PEAK_DETECTION_TIME: f64 = 1.5;
    pub const DEFAULT_PEAK_DETECTION_HEIGHT_THRESHOLD: f32 = 15.0;
    pub const DEFAULT_PEAK_TRACING_HEIGHT_THRESHOLD: f32 = 5.0;
    pub const DEFAULT_UPPER_THRESHOLD_FREQUENCY: f64 = 1500.0;
    pub const DEFAULT_MAX_BIN_JUMP: usize = 5;
    pub const DEFAULT_BROADEST_ALLOWED_INTERRUPTION: usize = 10;
    pub const DEFAULT_MOVING_FFT_AVERAGE_WIDTH: usize = 4;
    pub const DEFAULT_RESCUE_WINDOW_BEGIN_SECONDS: f64 = 2.0;
    pub const DEFAULT_RESCUE_WINDOW_END_SECONDS: f64 = 4.0;
    pub const DEFAULT_STABLE_RUN_MINIMUM: usize = 3;

    /// Validates and constructs a new configuration with every tunable
    /// parameter at its documented default.
    ///
    /// Fails if `channels` is outside `[1, 1]` (mono only, see Non-goals) or
    /// if `block_size` is odd (the spectrum layout assumes `block_size / 2`
    /// full bins).
    pub fn new(
        sample_rate: f64,
        step_size: usize,
        block_size: usize,
        channels: usize,
    ) -> Result<Self, EngineError> {
        if !(MIN_CHANNEL_COUNT..=MAX_CHANNEL_COUNT).contains(&channels) {
            return Err(EngineError::InvalidChannelCount {
                got: channels,
                min: MIN_CHANNEL_COUNT,
                max: MAX_CHANNEL_COUNT,
            });
        }
        if block_size % 2 != 0 {
            return Err(EngineError::OddBlockSize(block_size));
        }

        Ok(Self {
            sample_rate,
            step_size,
            block_size,
            channels,
            peak_detection_time: Self::DEFAULT_PEAK_DETECTION_TIME,
            peak_detection_height_threshold: Self::DEFAULT_PEAK_DETECTION_HEIGHT_THRESHOLD,
            peak_tracing_height_threshold: Self::DEFAULT_PEAK_TRACING_HEIGHT_THRESHOLD,
            upper_threshold_frequency: Self::DEFAULT_UPPER_THRESHOLD_FREQUENCY,
            max_bin_jump: Self::DEFAULT_MAX_BIN_JUMP,
            broadest_allowed_interruption: Self::DEFAULT_BROADEST_ALLOWED_INTERRUPTION,
            moving_fft_average_width: Self::DEFAULT_MOVING_FFT_AVERAGE_WIDTH,
            rescue_window_begin_seconds: Self::DEFAULT_RESCUE_WINDOW_BEGIN_SECONDS,
            rescue_window_end_seconds: Self::DEFAULT_RESCUE_WINDOW_END_SECONDS,
            stable_run_minimum: Self::DEFAULT_STABLE_RUN_MINIMUM,
            write_debug_csv: false,
            debug_csv_path: None,
        })
    }

    pub fn with_peak_detection_time(mut self, seconds: f64) -> Self {
        self.peak_detection_time = seconds;
        self
    }

    pub fn with_peak_detection_height_threshold(mut self, db: f32) -> Self {
        self.peak_detection_height_threshold = db;
        self
    }

    pub fn with_peak_tracing_height_threshold(mut self, db: f32) -> Self {
        self.peak_tracing_height_threshold = db;
        self
    }

    pub fn with_upper_threshold_frequency(mut self, hz: f64) -> Self {
        self.upper_threshold_frequency = hz;
        self
    }

    pub fn with_max_bin_jump(mut self, bins: usize) -> Self {
        self.max_bin_jump = bins;
        self
    }

    pub fn with_broadest_allowed_interruption(mut self, steps: usize) -> Self {
        self.broadest_allowed_interruption = steps;
        self
    }

    pub fn with_moving_fft_average_width(mut self, width: usize) -> Self {
        self.moving_fft_average_width = width;
        self
    }

    pub fn with_rescue_window(mut self, begin_seconds: f64, end_seconds: f64) -> Self {
        self.rescue_window_begin_seconds = begin_seconds;
        self.rescue_window_end_seconds = end_seconds;
        self
    }

    pub fn with_stable_run_minimum(mut self, minimum: usize) -> Self {
        self.stable_run_minimum = minimum;
        self
    }

    pub fn with_debug_csv(mut self, enabled: bool) -> Self {
        self.write_debug_csv = enabled;
        self
    }

    /// Enables the debug CSV sink and points it at `path` instead of the
    /// default `fft.csv` in the current working directory. The file is not
    /// opened here; `DopplerSpeedEngine::new` opens it via
    /// `CsvDebugSink::open_or_null`, which falls back to a no-op sink and
    /// logs a warning if `path` could not be created.
    pub fn with_debug_csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.write_debug_csv = true;
        self.debug_csv_path = Some(path.into());
        self
    }

    /// Number of usable bins in a block, `block_size / 2`.
    pub fn bin_count(&self) -> usize {
        self.block_size / 2
    }

    /// Dynamic, string-keyed parameter lookup for callers that only know a
    /// parameter id at runtime. Unknown ids are a lookup error, not a
    /// default or a panic, per the specification's error-handling design.
    pub fn parameter(&self, id: &str) -> Result<f64, EngineError> {
        Ok(match id {
            PEAK_DETECTION_TIME_ID => self.peak_detection_time,
            PEAK_DETECTION_HEIGHT_THRESHOLD_ID => self.peak_detection_height_threshold as f64,
            PEAK_TRACING_HEIGHT_THRESHOLD_ID => self.peak_tracing_height_threshold as f64,
            UPPER_THRESHOLD_FREQUENCY_ID => self.upper_threshold_frequency,
            MAX_BIN_JUMP_ID => self.max_bin_jump as f64,
            BROADEST_INTERRUPTION_ID => self.broadest_allowed_interruption as f64,
            MOVING_FFT_AVERAGE_WIDTH_ID => self.moving_fft_average_width as f64,
            RESCUE_WINDOW_BEGIN_SECONDS_ID => self.rescue_window_begin_seconds,
            RESCUE_WINDOW_END_SECONDS_ID => self.rescue_window_end_seconds,
            STABLE_RUN_MINIMUM_ID => self.stable_run_minimum as f64,
            other => return Err(EngineError::UnknownParameter(other.to_string())),
        })
    }
}
