//! Offline Doppler speed engine: turns a stream of short-time Fourier
//! spectra into a frequency trajectory and a single speed estimate for the
//! most persistent passing tonal in the recording.
#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    // clippy::restriction,
    // clippy::pedantic
)]
#![allow(clippy::suboptimal_flops, clippy::redundant_pub_crate)]
#![deny(missing_debug_implementations)]
#![deny(rustdoc::all)]

mod config;
mod diagnostics;
mod doppler;
mod engine;
mod error;
mod history;
mod magnitude;
mod moving_average;
mod peak;
mod reporter;
#[cfg(test)]
mod test_support;
mod timestamp;
mod tracer;

pub use config::{
    EngineConfig, BROADEST_INTERRUPTION_ID, MAX_BIN_JUMP_ID, MOVING_FFT_AVERAGE_WIDTH_ID,
    PEAK_DETECTION_HEIGHT_THRESHOLD_ID, PEAK_DETECTION_TIME_ID, PEAK_TRACING_HEIGHT_THRESHOLD_ID,
    RESCUE_WINDOW_BEGIN_SECONDS_ID, RESCUE_WINDOW_END_SECONDS_ID, STABLE_RUN_MINIMUM_ID,
    UPPER_THRESHOLD_FREQUENCY_ID,
};
pub use diagnostics::{CsvDebugSink, DebugSink, NullDebugSink};
pub use doppler::{bin_for_freq, doppler_speed_moving_source, freq_for_bin, SPEED_OF_SOUND_M_PER_S};
pub use engine::{DominatingFrequencies, DopplerSpeedEngine};
pub use error::EngineError;
pub use reporter::{EngineOutput, FrequencyFeature, SpeedEstimate};
pub use timestamp::{RealTime, RealTimeDuration};
