//! Peak Tracer (§4.4): the core association/aging/retirement algorithm.
//!
//! Grounded on the original `DopplerSpeedCalculator::tracePeaks`, restructured
//! per the "raw pointer webs" design note: tracks live in a plain `Vec`,
//! addressed by index for the duration of one block, rather than through a
//! shared graveyard of `PeakHistory*`.

use crate::config::EngineConfig;
use crate::history::PeakHistory;
use crate::peak::Peak;
use crate::timestamp::RealTime;

/// An ordered sequence of tracks, kept sorted ascending by current location.
pub type TrackSet = Vec<PeakHistory>;

/// Carries the association/aging/retirement parameters for one engine run.
/// Stateless itself: all mutable state lives in the [`TrackSet`] it is
/// handed each block.
#[derive(Debug, Clone, Copy)]
pub struct PeakTracer {
    max_bin_jump: f64,
    broadest_allowed_interruption: usize,
    stable_run_minimum: usize,
    rescue_window_begin_seconds: f64,
    rescue_window_end_seconds: f64,
    peak_detection_time: f64,
}

impl PeakTracer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            max_bin_jump: config.max_bin_jump as f64,
            broadest_allowed_interruption: config.broadest_allowed_interruption,
            stable_run_minimum: config.stable_run_minimum,
            rescue_window_begin_seconds: config.rescue_window_begin_seconds,
            rescue_window_end_seconds: config.rescue_window_end_seconds,
            peak_detection_time: config.peak_detection_time,
        }
    }

    /// Associates this block's `peaks` (ascending by position) with `tracks`
    /// (ascending by current location), admits new tracks while still inside
    /// the admission window, ages every track that received nothing, then
    /// retires the dead. Leaves `tracks` sorted ascending by current
    /// location.
    pub fn process_block(&self, tracks: &mut TrackSet, peaks: &[Peak], timestamp: RealTime) {
        let allow_new = timestamp.as_seconds_f64() < self.peak_detection_time;
        let mut received = vec![false; tracks.len()];
        let mut admitted = Vec::new();

        for &peak in peaks {
            let pos = peak.interpolated_position;
            let curr = tracks.partition_point(|t| t.current_location() <= pos);
            let prev = curr.checked_sub(1);

            let d_prev = prev.map(|i| (pos - tracks[i].current_location()).abs());
            let d_curr = (curr < tracks.len()).then(|| (pos - tracks[curr].current_location()).abs());

            // closer of the two candidates wins; a tie favors curr_track.
            let chosen = match (d_prev, d_curr) {
                (Some(dp), Some(dc)) if dp < dc => prev.filter(|_| dp <= self.max_bin_jump),
                (Some(_), Some(dc)) => Some(curr).filter(|_| dc <= self.max_bin_jump),
                (Some(dp), None) => prev.filter(|_| dp <= self.max_bin_jump),
                (None, Some(dc)) => Some(curr).filter(|_| dc <= self.max_bin_jump),
                (None, None) => None,
            };

            match chosen {
                Some(idx) if received[idx] => {
                    log::warn!(
                        "peak at position {} (t={:.3}s) would double-associate with track {idx}; dropping",
                        peak.position,
                        peak.timestamp.as_seconds_f64()
                    );
                }
                Some(idx) if prev == Some(idx) && pos > tracks[idx].current_location() + 1.0 => {
                    log::warn!(
                        "peak at position {} (t={:.3}s) overshoots track {idx}'s last position {} by more than one bin; dropping",
                        peak.position,
                        peak.timestamp.as_seconds_f64(),
                        tracks[idx].current_location()
                    );
                }
                Some(idx) => {
                    tracks[idx].add_peak(peak);
                    received[idx] = true;
                }
                None if allow_new => {
                    admitted.push(PeakHistory::new(
                        peak,
                        self.broadest_allowed_interruption,
                        self.stable_run_minimum,
                    ));
                }
                None => {}
            }
        }

        for (track, got_peak) in tracks.iter_mut().zip(received.iter()) {
            if !got_peak {
                track.no_peak();
            }
        }

        tracks.retain_mut(|track| self.should_keep_alive(track));
        tracks.extend(admitted);
        tracks.sort_by(|a, b| {
            a.current_location()
                .partial_cmp(&b.current_location())
                .expect("bin positions are never NaN")
        });
    }

    fn should_keep_alive(&self, track: &mut PeakHistory) -> bool {
        track.is_alive() || self.rescue(track)
    }

    /// A track that the naive liveness test would retire survives anyway if
    /// its stable begin/end window looks like a legitimate downward Doppler
    /// sweep across the observation period.
    fn rescue(&self, track: &PeakHistory) -> bool {
        let (Some(begin), Some(end)) = (track.stable_begin(), track.stable_end()) else {
            return false;
        };
        begin.timestamp.as_seconds_f64() < self.rescue_window_begin_seconds
            && end.timestamp.as_seconds_f64() >= self.rescue_window_end_seconds
            && begin.interpolated_position > end.interpolated_position
    }
}
