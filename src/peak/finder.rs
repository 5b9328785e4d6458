//! Single-pass, direction-tracking peak scan (§4.3).
//!
//! Grounded on the teacher's `LocalMinMaxIterator` (a single-pass state
//! machine tracking ascending/descending runs over a slice), generalized
//! from "every local extremum" to "maxima whose two flanking valleys are
//! both at least `threshold` below it", i.e. prominence-qualified peaks
//! only, matching the original `PeakFinder::findPeaksThreshold` semantics.

use super::Peak;
use crate::timestamp::RealTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
    Stagnating,
}

/// A still-open candidate peak: the value/position of a summit whose left
/// valley has already confirmed sufficient prominence, waiting on its right
/// valley to do the same.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    value: f32,
    height: f32,
    position: usize,
}

/// Scans `x` for prominence-qualified local maxima and returns them in
/// ascending position order, each stamped with `timestamp`.
///
/// A peak is emitted only once both its left and right valleys are at
/// least `threshold` below its value (§4.3's prominence test); plateaus are
/// tolerated and neither close nor falsify a pending candidate.
pub fn find_peaks(x: &[f32], threshold: f32, timestamp: RealTime) -> Vec<Peak> {
    if x.is_empty() {
        return Vec::new();
    }

    let mut direction = Direction::Stagnating;
    let mut last_valley_value = x[0];
    let mut candidate: Option<Candidate> = None;
    let mut previous = x[0];
    let mut output = Vec::new();

    for (i, &current) in x.iter().enumerate() {
        if current < previous {
            if direction != Direction::Descending {
                let height = previous - last_valley_value;
                candidate = (height >= threshold).then_some(Candidate {
                    value: previous,
                    height,
                    position: i - 1,
                });
                direction = Direction::Descending;
            }
        } else if current > previous {
            if direction != Direction::Ascending {
                if let Some(cand) = candidate {
                    let height_right = cand.value - previous;
                    if height_right >= threshold {
                        let height = cand.height.min(height_right);
                        output.push(Peak::new(cand.value, height, cand.position, timestamp));
                    }
                }
                candidate = None;
                last_valley_value = previous;
                direction = Direction::Ascending;
            }
        } else {
            direction = Direction::Stagnating;
        }

        previous = current;
    }

    output
}
