//! Speed Reporter (§4.5): end-of-stream selection of the dominant track and
//! the two output feature streams the engine hands back from `finish()`.

use crate::config::EngineConfig;
use crate::doppler::doppler_speed_moving_source;
use crate::doppler::freq_for_bin;
use crate::history::PeakHistory;
use crate::timestamp::{RealTime, RealTimeDuration};

/// One emitted frequency observation, one per peak of the dominant track.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrequencyFeature {
    pub timestamp: RealTime,
    pub duration: RealTimeDuration,
    pub frequency_hz: f64,
}

/// The single speed estimate, if any track had both a stable begin and end.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedEstimate {
    pub timestamp: RealTime,
    pub duration: RealTimeDuration,
    pub speed_kmh: f64,
}

/// The two output streams described in §6: a frequency trajectory for the
/// dominant track, and zero or one derived speed.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineOutput {
    pub dominating_frequencies: Vec<FrequencyFeature>,
    pub naive_speed_of_source: Option<SpeedEstimate>,
}

/// Runs §4.5 over the final `TrackSet`. Pure; does not mutate `tracks`.
pub fn report(tracks: &[PeakHistory], config: &EngineConfig) -> EngineOutput {
    if tracks.is_empty() {
        return EngineOutput::default();
    }

    let mut by_prominence: Vec<&PeakHistory> = tracks.iter().collect();
    by_prominence.sort_by(|a, b| {
        b.sum_of_heights()
            .partial_cmp(&a.sum_of_heights())
            .expect("accumulated prominence is never NaN")
    });

    let step_duration = RealTimeDuration::from_seconds(config.step_size as f64 / config.sample_rate);
    let dominant = by_prominence[0];
    let dominating_frequencies = dominant
        .peaks()
        .iter()
        .map(|peak| FrequencyFeature {
            timestamp: peak.timestamp,
            duration: step_duration,
            frequency_hz: freq_for_bin(peak.interpolated_position, config.sample_rate, config.block_size),
        })
        .collect();

    let naive_speed_of_source = by_prominence.iter().find_map(|track| {
        let begin = track.stable_begin()?;
        let end = track.stable_end()?;
        Some(SpeedEstimate {
            timestamp: begin.timestamp,
            duration: end.timestamp - begin.timestamp,
            speed_kmh: doppler_speed_moving_source(begin.interpolated_position, end.interpolated_position),
        })
    });

    EngineOutput {
        dominating_frequencies,
        naive_speed_of_source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peak::Peak;

    fn peak(position: usize, t: f64) -> Peak {
        Peak::new(0.0, 20.0, position, RealTime::from_seconds(t))
    }

    fn config() -> EngineConfig {
        EngineConfig::new(44_100.0, 2048, 8192, 1).unwrap()
    }

    #[test]
    fn empty_track_set_yields_empty_output() {
        let out = report(&[], &config());
        assert!(out.dominating_frequencies.is_empty());
        assert!(out.naive_speed_of_source.is_none());
    }

    #[test]
    fn picks_the_track_with_highest_total_prominence() {
        let weak = PeakHistory::new(peak(100, 0.0), 10, 3);
        let mut strong = PeakHistory::new(peak(200, 0.0), 10, 3);
        strong.add_peak(Peak::new(0.0, 50.0, 200, RealTime::from_seconds(0.1)));
        let tracks = vec![weak, strong];

        let out = report(&tracks, &config());
        assert!(out
            .dominating_frequencies
            .iter()
            .all(|f| (f.frequency_hz - freq_for_bin(200.0, 44_100.0, 8192)).abs() < 1e-6));
    }

    #[test]
    fn emits_a_speed_estimate_when_a_track_has_stable_begin_and_end() {
        let mut track = PeakHistory::new(peak(120, 0.0), 10, 3);
        for i in 0..3 {
            track.add_peak(peak(120, 0.1 + i as f64 * 0.1));
        }
        for i in 0..4 {
            track.add_peak(peak(80, 4.0 + i as f64 * 0.1));
        }
        let out = report(&[track], &config());
        let speed = out.naive_speed_of_source.expect("should find a speed estimate");
        assert!(speed.speed_kmh > 0.0, "frequency dropped, so speed should read positive");
    }

    #[test]
    fn skips_tracks_without_a_stable_window_in_favor_of_ones_that_have_it() {
        let noisy = PeakHistory::new(peak(50, 0.0), 10, 3);
        let mut stable = PeakHistory::new(peak(120, 0.0), 10, 3);
        for i in 0..3 {
            stable.add_peak(peak(120, 0.1 + i as f64 * 0.1));
        }
        for i in 0..4 {
            stable.add_peak(peak(90, 4.0 + i as f64 * 0.1));
        }
        let out = report(&[noisy, stable], &config());
        assert!(out.naive_speed_of_source.is_some());
    }
}
