//! Spectral flux onset strength
//!
//! Frame-to-frame positive difference of banded log magnitudes, summed
//! across bands. Half-wave rectification keeps energy increases (attacks)
//! and discards decays, so the result peaks at note and drum onsets.

/// Compute per-hop spectral flux from banded spectrogram frames
///
/// # Arguments
///
/// * `banded_frames` - `n_frames x n_bands` banded log-magnitude spectrogram
///
/// # Returns
///
/// One flux value per frame, same length as the input; the first frame has
/// no predecessor and gets flux 0.
pub fn spectral_flux(banded_frames: &[Vec<f32>]) -> Vec<f32> {
    if banded_frames.is_empty() {
        return Vec::new();
    }

    let mut flux = Vec::with_capacity(banded_frames.len());
    flux.push(0.0);

    for pair in banded_frames.windows(2) {
        let sum: f32 = pair[0]
            .iter()
            .zip(pair[1].iter())
            .map(|(&prev, &curr)| (curr - prev).max(0.0))
            .sum();
        flux.push(sum);
    }

    flux
}
