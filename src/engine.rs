//! `DopplerSpeedEngine` (§4.7): the crate's single public entry point.
//!
//! Mirrors the "one struct owns the pipeline, two-method lifecycle" shape
//! the teacher's own top-level analyzer type uses, generalized from
//! per-callback streaming to offline batch-then-finish.

use crate::config::EngineConfig;
use crate::diagnostics::{CsvDebugSink, DebugSink, NullDebugSink};
use crate::doppler::{bin_for_freq, freq_for_bin};
use crate::magnitude::extract_magnitudes;
use crate::moving_average::MovingAverageBuffer;
use crate::peak::find_peaks;
use crate::reporter::{self, EngineOutput, FrequencyFeature};
use crate::timestamp::RealTime;
use crate::tracer::{PeakTracer, TrackSet};

/// Frequency features produced by one call to [`DopplerSpeedEngine::process`].
/// Always empty in this engine, since the dominant-track selection only
/// resolves at [`DopplerSpeedEngine::finish`], but the method keeps this
/// return shape so the facade's contract matches the two-output-stream
/// model in full.
pub type DominatingFrequencies = Vec<FrequencyFeature>;

/// Owns the full analysis pipeline for one recording: the moving-average
/// smoothing buffer, the live track set, and the optional debug sink.
pub struct DopplerSpeedEngine {
    config: EngineConfig,
    moving_average: MovingAverageBuffer,
    tracer: PeakTracer,
    tracks: TrackSet,
    debug_sink: Box<dyn DebugSink>,
    header_written: bool,
    block_count: u64,
}

// `Box<dyn DebugSink>` doesn't implement `Debug` on its own (the trait object
// has no blanket impl even though `DebugSink: Debug`), so this is written by
// hand rather than derived; the sink itself isn't useful debug output anyway.
impl std::fmt::Debug for DopplerSpeedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DopplerSpeedEngine")
            .field("config", &self.config)
            .field("tracks", &self.tracks)
            .field("block_count", &self.block_count)
            .finish_non_exhaustive()
    }
}

impl DopplerSpeedEngine {
    pub fn new(config: EngineConfig) -> Self {
        let moving_average = MovingAverageBuffer::new(config.moving_fft_average_width, config.block_size);
        let tracer = PeakTracer::new(&config);
        let debug_sink: Box<dyn DebugSink> = if config.write_debug_csv {
            let path = config
                .debug_csv_path
                .clone()
                .unwrap_or_else(crate::diagnostics::default_debug_csv_path);
            CsvDebugSink::open_or_null(path)
        } else {
            Box::new(NullDebugSink)
        };

        Self {
            config,
            moving_average,
            tracer,
            tracks: Vec::new(),
            debug_sink,
            header_written: false,
            block_count: 0,
        }
    }

    /// Runs stages 1-4 for one block: magnitude extraction, moving-average
    /// smoothing, peak finding, and track association/aging/retirement.
    pub fn process(&mut self, spectrum: &[f32], timestamp: RealTime) -> DominatingFrequencies {
        let magnitudes = extract_magnitudes(spectrum, self.config.block_size);

        if let Some(averaged) = self.moving_average.push(magnitudes) {
            self.write_debug_row(&averaged);

            let bin_limit = bin_for_freq(
                self.config.upper_threshold_frequency,
                self.config.sample_rate,
                self.config.block_size,
            )
            .round() as usize;
            let bin_limit = bin_limit.min(averaged.len());

            let allow_new = timestamp.as_seconds_f64() < self.config.peak_detection_time;
            let threshold = if allow_new {
                self.config.peak_detection_height_threshold
            } else {
                self.config.peak_tracing_height_threshold
            };

            let peaks = find_peaks(&averaged[..bin_limit], threshold, timestamp);
            log::trace!(
                "block {}: {} peaks found in {} searched bins",
                self.block_count,
                peaks.len(),
                bin_limit
            );
            self.tracer.process_block(&mut self.tracks, &peaks, timestamp);
        }

        self.block_count += 1;
        Vec::new()
    }

    /// Runs §4.5 once, consuming the engine: there is nothing left to feed
    /// it after end-of-stream.
    pub fn finish(self) -> EngineOutput {
        log::debug!(
            "finishing after {} blocks with {} live tracks",
            self.block_count,
            self.tracks.len()
        );
        reporter::report(&self.tracks, &self.config)
    }

    fn write_debug_row(&mut self, averaged: &[f32]) {
        if !self.header_written {
            let bin_frequencies: Vec<f64> = (0..averaged.len())
                .map(|bin| freq_for_bin(bin as f64, self.config.sample_rate, self.config.block_size))
                .collect();
            self.debug_sink.write_header(&bin_frequencies);
            self.header_written = true;
        }
        self.debug_sink.write_row(averaged);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::synthesize_tone_spectrum;

    fn config() -> EngineConfig {
        EngineConfig::new(44_100.0, 2048, 8192, 1)
            .unwrap()
            .with_moving_fft_average_width(1)
    }

    #[test]
    fn process_never_returns_incremental_frequencies() {
        let mut engine = DopplerSpeedEngine::new(config());
        let spectrum = synthesize_tone_spectrum(1000.0, 44_100.0, 8192, 1.0);
        let out = engine.process(&spectrum, RealTime::from_seconds(0.0));
        assert!(out.is_empty());
    }

    #[test]
    fn finish_on_an_empty_engine_is_empty() {
        let engine = DopplerSpeedEngine::new(config());
        let out = engine.finish();
        assert!(out.dominating_frequencies.is_empty());
        assert!(out.naive_speed_of_source.is_none());
    }

    #[test]
    fn a_steady_tone_produces_a_dominant_track() {
        let mut engine = DopplerSpeedEngine::new(config());
        let step = 2048usize;
        let sample_rate = 44_100.0;
        for block in 0..40 {
            let t = block as f64 * step as f64 / sample_rate;
            let spectrum = synthesize_tone_spectrum(1000.0, sample_rate, 8192, 1.0);
            engine.process(&spectrum, RealTime::from_seconds(t));
        }
        let out = engine.finish();
        assert!(!out.dominating_frequencies.is_empty());
        for feature in &out.dominating_frequencies {
            assert!((feature.frequency_hz - 1000.0).abs() < 20.0);
        }
    }
}
