//! Synthetic spectrum generation for tests.
//!
//! Grounded on the teacher's `read_wav_to_mono` test helper: same role
//! (produce deterministic, known-good input for higher-level tests) but a
//! different signal source, since this engine consumes spectra rather than
//! raw samples and decoding audio files is out of scope.

use crate::doppler::bin_for_freq;

/// Noise floor magnitude given to every bin that isn't the synthesized tone,
/// chosen so `norm_db` of it is finite (a literal zero produces `-inf`,
/// which is a pathological input no real spectrum would ever present).
const NOISE_FLOOR: f32 = 1.0;

/// Builds one block's complex spectrum, laid out the way
/// [`crate::magnitude::extract_magnitudes`] expects, containing a single
/// synthetic tone at `freq_hz` against a flat noise floor.
pub fn synthesize_tone_spectrum(freq_hz: f64, sample_rate: f64, block_size: usize, amplitude: f32) -> Vec<f32> {
    let mut spectrum = vec![0.0f32; block_size + 2];
    for k in 1..=block_size / 2 {
        spectrum[2 * k] = NOISE_FLOOR;
    }

    let bin = bin_for_freq(freq_hz, sample_rate, block_size).round() as usize;
    let bin = bin.clamp(1, block_size / 2);
    spectrum[2 * bin] = amplitude;
    spectrum
}

/// Builds a spectrum with two independent tones, for tests exercising
/// competing tracks.
pub fn synthesize_two_tone_spectrum(
    freq_a_hz: f64,
    freq_b_hz: f64,
    sample_rate: f64,
    block_size: usize,
    amplitude: f32,
) -> Vec<f32> {
    let mut spectrum = vec![0.0f32; block_size + 2];
    for k in 1..=block_size / 2 {
        spectrum[2 * k] = NOISE_FLOOR;
    }
    for freq in [freq_a_hz, freq_b_hz] {
        let bin = bin_for_freq(freq, sample_rate, block_size).round() as usize;
        let bin = bin.clamp(1, block_size / 2);
        spectrum[2 * bin] = amplitude;
    }
    spectrum
}

/// A spectrum of pure noise floor, no tone at all, for tests asserting
/// that sub-threshold input yields no tracks.
pub fn synthesize_noise_spectrum(block_size: usize) -> Vec<f32> {
    let mut spectrum = vec![0.0f32; block_size + 2];
    for k in 1..=block_size / 2 {
        spectrum[2 * k] = NOISE_FLOOR;
    }
    spectrum
}

/// The instantaneous frequency of a linear chirp from `f_start` to `f_end`
/// over `duration` seconds, at time `t`. Used by tests to drive
/// [`synthesize_tone_spectrum`] block by block and to compute the expected
/// speed independently of the engine under test.
pub fn linear_chirp_frequency(t: f64, f_start: f64, f_end: f64, duration: f64) -> f64 {
    let fraction = (t / duration).clamp(0.0, 1.0);
    f_start + (f_end - f_start) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::magnitude::extract_magnitudes;

    #[test]
    fn tone_spectrum_has_magnitude_spike_at_the_right_bin() {
        let sample_rate = 44_100.0;
        let block_size = 8192;
        let spectrum = synthesize_tone_spectrum(1000.0, sample_rate, block_size, 5000.0);
        let magnitudes = extract_magnitudes(&spectrum, block_size);
        let expected_bin = bin_for_freq(1000.0, sample_rate, block_size).round() as usize;
        let (peak_bin, &peak_value) = magnitudes
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap();
        assert_eq!(peak_bin + 1, expected_bin);
        assert!(peak_value > NOISE_FLOOR);
    }

    #[test]
    fn chirp_frequency_interpolates_linearly_and_clamps() {
        assert_eq!(linear_chirp_frequency(0.0, 1100.0, 900.0, 6.0), 1100.0);
        assert_eq!(linear_chirp_frequency(6.0, 1100.0, 900.0, 6.0), 900.0);
        assert_eq!(linear_chirp_frequency(3.0, 1100.0, 900.0, 6.0), 1000.0);
        assert_eq!(linear_chirp_frequency(100.0, 1100.0, 900.0, 6.0), 900.0);
    }
}
