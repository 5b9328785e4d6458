//! Magnitude Extractor (§4.1): one block's complex spectrum → a real
//! magnitude vector.

/// Converts one block's complex spectrum, laid out as interleaved
/// `(re, im)` pairs for bins `0..=block_size/2`, into the magnitudes of
/// bins `1..=block_size/2` (the DC term at bin 0 is skipped).
///
/// `spectrum` must therefore have length `block_size + 2`.
pub fn extract_magnitudes(spectrum: &[f32], block_size: usize) -> Vec<f32> {
    debug_assert_eq!(
        spectrum.len(),
        block_size + 2,
        "expected block_size + 2 interleaved re/im values, got {}",
        spectrum.len()
    );

    let mut magnitudes = Vec::with_capacity(block_size / 2);
    let mut i = 2;
    while i < block_size + 2 {
        let re = spectrum[i];
        let im = spectrum[i + 1];
        magnitudes.push((re * re + im * im).sqrt());
        i += 2;
    }
    magnitudes
}
