//! [`PeakHistory`]: a single track across time (§3).
//!
//! Grounded on the original `PeakHistory.cpp`/`.hpp`, restructured per the
//! "raw pointer webs" design note (§9): peaks are owned by value inside the
//! track rather than referenced through a shared graveyard of pointers.

use crate::peak::Peak;

/// An ordered, append-only sequence of [`Peak`] observations believed to
/// belong to one persistent spectral line, plus the bookkeeping needed to
/// decide when the track should be retired.
#[derive(Debug, Clone)]
pub struct PeakHistory {
    peaks: Vec<Peak>,
    broadest_allowed_interruption: usize,
    stable_run_minimum: usize,
    sum_of_heights: f64,
    total: usize,
    missed: usize,
    recently_missed: usize,
    alive: bool,
}

impl PeakHistory {
    /// Starts a new track from its first observed peak.
    pub fn new(initial_peak: Peak, broadest_allowed_interruption: usize, stable_run_minimum: usize) -> Self {
        let mut history = Self {
            peaks: Vec::new(),
            broadest_allowed_interruption,
            stable_run_minimum,
            sum_of_heights: 0.0,
            total: 0,
            missed: 0,
            recently_missed: 0,
            alive: true,
        };
        history.add_peak(initial_peak);
        history
    }

    /// Records a new peak observation on this track.
    pub fn add_peak(&mut self, peak: Peak) {
        self.sum_of_heights += peak.height as f64;
        self.peaks.push(peak);
        self.recently_missed = 0;
        self.total += 1;
    }

    /// Records that this block produced no peak for this track.
    pub fn no_peak(&mut self) {
        self.missed += 1;
        self.recently_missed += 1;
        self.total += 1;
    }

    pub fn peaks(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn sum_of_heights(&self) -> f64 {
        self.sum_of_heights
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn missed(&self) -> usize {
        self.missed
    }

    pub fn recently_missed(&self) -> usize {
        self.recently_missed
    }

    /// The track's "current location" used for matching: the last peak's
    /// refined bin position.
    pub fn current_location(&self) -> f64 {
        self.last().interpolated_position
    }

    pub fn last(&self) -> &Peak {
        self.peaks
            .last()
            .expect("a PeakHistory always has at least one peak")
    }

    pub fn first(&self) -> &Peak {
        &self.peaks[0]
    }

    /// The naive liveness test: `alive := alive AND recently_missed <
    /// broadest_allowed_interruption`. Monotonic: once this returns
    /// `false` it returns `false` on every later call, since `alive` is
    /// never set back to `true`.
    ///
    /// Does not by itself apply the rescue clause (§4.4); that requires
    /// config thresholds this type does not hold, and is applied by
    /// [`crate::tracer::PeakTracer`] before acting on this result.
    pub fn is_alive(&mut self) -> bool {
        self.alive = self.alive && self.recently_missed < self.broadest_allowed_interruption;
        self.alive
    }

    /// First peak of the earliest run of at least `stable_run_minimum`
    /// consecutive peaks sharing the exact same `interpolated_position`.
    pub fn stable_begin(&self) -> Option<&Peak> {
        let mut run_start = 0usize;
        let mut run_value: Option<f64> = None;
        let mut run_len = 0usize;

        for (i, peak) in self.peaks.iter().enumerate() {
            if run_value == Some(peak.interpolated_position) {
                run_len += 1;
            } else {
                run_start = i;
                run_value = Some(peak.interpolated_position);
                run_len = 1;
            }
            if run_len >= self.stable_run_minimum {
                return Some(&self.peaks[run_start]);
            }
        }
        None
    }

    /// Symmetric counterpart scanning from the most recent peak backwards,
    /// tolerating up to ±1 bin of drift within a run. The run length
    /// requirement is one more than [`Self::stable_begin`]'s, an asymmetry
    /// that is observed in the source algorithm and preserved (see
    /// SPEC_FULL.md §9 "Open questions").
    pub fn stable_end(&self) -> Option<&Peak> {
        let minimum = self.stable_run_minimum + 1;
        let mut run_value: Option<f64> = None;
        let mut run_len = 0usize;

        for peak in self.peaks.iter().rev() {
            let matches = run_value
                .map(|v| (v - peak.interpolated_position).abs() <= 1.0)
                .unwrap_or(false);
            if matches {
                run_len += 1;
            } else {
                run_value = Some(peak.interpolated_position);
                run_len = 1;
            }
            if run_len >= minimum {
                return Some(peak);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timestamp::RealTime;

    fn peak_at(position: usize, t: f64, height: f32) -> Peak {
        let mut p = Peak::new(0.0, height, position, RealTime::from_seconds(t));
        p.interpolated_position = position as f64;
        p
    }

    #[test]
    fn counter_invariant_holds_across_add_and_miss() {
        let mut history = PeakHistory::new(peak_at(10, 0.0, 20.0), 10, 3);
        history.add_peak(peak_at(11, 0.1, 20.0));
        history.no_peak();
        history.no_peak();
        assert_eq!(history.total(), history.peaks().len() + history.missed());
        assert_eq!(history.missed(), 2);
    }

    #[test]
    fn recently_missed_resets_on_add_peak() {
        let mut history = PeakHistory::new(peak_at(10, 0.0, 20.0), 10, 3);
        history.no_peak();
        history.no_peak();
        assert_eq!(history.recently_missed(), 2);
        history.add_peak(peak_at(10, 0.2, 20.0));
        assert_eq!(history.recently_missed(), 0);
    }

    #[test]
    fn death_is_monotonic() {
        let mut history = PeakHistory::new(peak_at(10, 0.0, 20.0), 2, 3);
        assert!(history.is_alive());
        history.no_peak();
        history.no_peak();
        assert!(!history.is_alive());
        // even if somehow "recovered" (which no public API allows), a second
        // call must stay false.
        assert!(!history.is_alive());
    }

    #[test]
    fn stable_begin_finds_first_peak_of_qualifying_run() {
        let mut history = PeakHistory::new(peak_at(10, 0.0, 20.0), 10, 3);
        history.add_peak(peak_at(12, 0.1, 20.0));
        history.add_peak(peak_at(12, 0.2, 20.0));
        history.add_peak(peak_at(12, 0.3, 20.0));
        history.add_peak(peak_at(15, 0.4, 20.0));
        let begin = history.stable_begin().expect("should find a stable run");
        assert_eq!(begin.position, 12);
        assert!((begin.timestamp.as_seconds_f64() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn stable_begin_is_none_when_no_run_reaches_minimum() {
        let mut history = PeakHistory::new(peak_at(10, 0.0, 20.0), 10, 3);
        history.add_peak(peak_at(11, 0.1, 20.0));
        history.add_peak(peak_at(12, 0.2, 20.0));
        assert!(history.stable_begin().is_none());
    }

    #[test]
    fn stable_end_tolerates_one_bin_of_drift() {
        let mut history = PeakHistory::new(peak_at(20, 0.0, 20.0), 10, 3);
        history.add_peak(peak_at(19, 1.0, 20.0));
        history.add_peak(peak_at(18, 2.0, 20.0));
        history.add_peak(peak_at(19, 3.0, 20.0));
        history.add_peak(peak_at(18, 4.0, 20.0));
        // minimum for "end" is stable_run_minimum + 1 = 4
        let end = history.stable_end().expect("should find a trailing stable run");
        assert_eq!(end.position, 19);
    }
}
