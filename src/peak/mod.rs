//! Peak data type (§3) and the Peak Finder (§4.3).

mod finder;

pub use finder::find_peaks;

use crate::timestamp::RealTime;

/// An immutable spectral peak observation: a prominence-qualified local
/// maximum found in one block's (averaged) magnitude spectrum.
///
/// Grounded on the teacher's `Peak`/`InternalPeak` split (a small `Copy`
/// value type), collapsed into one type here because this engine has no
/// "index valid only for one iteration" caveat to separate out: a [`Peak`]
/// is immutable and fully self-describing once created.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Peak {
    /// Magnitude at the peak, in dB.
    pub value: f32,
    /// Prominence: the smaller of (value - left valley, value - right valley), in dB.
    pub height: f32,
    /// Integer bin index of the maximum sample.
    pub position: usize,
    /// Real-valued, refined bin index. Identity refinement (see
    /// SPEC_FULL.md §9 "Open questions"): no interpolator is specified, so
    /// this is currently always equal to `position as f64`.
    pub interpolated_position: f64,
    /// The block timestamp this peak was observed at.
    pub timestamp: RealTime,
}

impl Peak {
    /// Constructs a new peak. `height` must already satisfy the detection
    /// threshold it was found with; this is an invariant of the type, not
    /// re-validated here since the only caller is [`find_peaks`], which
    /// enforces it by construction.
    pub(crate) fn new(value: f32, height: f32, position: usize, timestamp: RealTime) -> Self {
        Self {
            value,
            height,
            position,
            interpolated_position: interpolate_position(position),
            timestamp,
        }
    }
}

/// Refines an integer bin index into a real-valued one. Currently the
/// identity function: no interpolator (parabolic or otherwise) is specified
/// by the source algorithm, so this seam exists to make that an explicit,
/// named decision rather than a silent `as f64` cast scattered at call sites.
fn interpolate_position(position: usize) -> f64 {
    position as f64
}
