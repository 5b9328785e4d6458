//! Doppler Formula (§4.6): pure unit conversions and the speed estimate
//! itself. Grounded on the original `dopplerSpeedMovingSource` free function.

/// Speed of sound in air, m/s, at the reference temperature this lineage's
/// original implementation assumes.
pub const SPEED_OF_SOUND_M_PER_S: f64 = 343.0;

const METERS_PER_SECOND_TO_KM_PER_HOUR: f64 = 3.6;

/// Estimates a moving source's speed in km/h from its approaching frequency
/// `f_a` and leaving frequency `f_l`. Scale-invariant: frequencies or raw bin
/// positions may be passed directly as long as both arguments use the same
/// unit.
pub fn doppler_speed_moving_source(f_a: f64, f_l: f64) -> f64 {
    (f_a - f_l) / (f_a + f_l) * SPEED_OF_SOUND_M_PER_S * METERS_PER_SECOND_TO_KM_PER_HOUR
}

/// Centre frequency of bin `b`, in Hz.
pub fn freq_for_bin(b: f64, sample_rate: f64, block_size: usize) -> f64 {
    sample_rate * b / block_size as f64
}

/// Inverse of [`freq_for_bin`]: the (real-valued) bin index for frequency `f`.
pub fn bin_for_freq(f: f64, sample_rate: f64, block_size: usize) -> f64 {
    f * block_size as f64 / sample_rate
}
