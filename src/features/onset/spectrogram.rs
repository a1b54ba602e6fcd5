//! Banded log-magnitude spectrogram
//!
//! Short-time magnitude spectra grouped into log-spaced frequency bands.
//! Log spacing mirrors how musical energy is distributed: low bands resolve
//! kick and bass attacks, high bands resolve hats and transient noise, and
//! `log1p` compression keeps loud passages from dominating the flux.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Compute a banded log-magnitude spectrogram
///
/// Frames the waveform at `hop_size`, applies a Hann window, computes the
/// magnitude spectrum per frame, and sums it into `n_bands` log-spaced
/// frequency bands compressed with `log1p`.
///
/// The frame count is always `samples.len() / hop_size` (floor); frames
/// reaching past the end of the waveform are zero-padded.
///
/// # Arguments
///
/// * `samples` - Mono audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `frame_size` - FFT frame size (e.g. 1024)
/// * `hop_size` - Samples between consecutive frames (e.g. 512)
/// * `n_bands` - Number of log-spaced output bands
///
/// # Returns
///
/// `n_frames x n_bands` matrix of compressed band magnitudes
pub fn banded_log_spectrogram(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    hop_size: usize,
    n_bands: usize,
) -> Vec<Vec<f32>> {
    let n_frames = samples.len() / hop_size;
    if n_frames == 0 {
        return Vec::new();
    }

    let n_bins = frame_size / 2 + 1;
    let edges = band_edges(n_bins, n_bands, sample_rate, frame_size);

    let window: Vec<f32> = (0..frame_size)
        .map(|i| {
            let phase = 2.0 * std::f32::consts::PI * i as f32 / frame_size as f32;
            0.5 * (1.0 - phase.cos())
        })
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(frame_size);

    let mut frames = Vec::with_capacity(n_frames);
    let mut buffer = vec![Complex::new(0.0f32, 0.0); frame_size];

    for frame_idx in 0..n_frames {
        let start = frame_idx * hop_size;
        let available = (samples.len() - start).min(frame_size);

        for i in 0..frame_size {
            let sample = if i < available { samples[start + i] } else { 0.0 };
            buffer[i] = Complex::new(sample * window[i], 0.0);
        }

        fft.process(&mut buffer);

        let mut bands = vec![0.0f32; n_bands];
        for (band, bins) in edges.windows(2).enumerate() {
            let mut energy = 0.0f32;
            for bin in bins[0]..bins[1] {
                energy += buffer[bin].norm();
            }
            bands[band] = (1.0 + energy).ln();
        }
        frames.push(bands);
    }

    frames
}

/// Compute log-spaced band edges as FFT bin indices
///
/// Returns `n_bands + 1` non-decreasing bin indices spanning from the first
/// non-DC bin to Nyquist. Each band covers at least one bin while bins
/// remain; any leftover bands collapse to empty ranges at Nyquist.
fn band_edges(n_bins: usize, n_bands: usize, sample_rate: u32, frame_size: usize) -> Vec<usize> {
    let bin_hz = sample_rate as f32 / frame_size as f32;
    let f_lo = bin_hz.max(1.0);
    let f_hi = sample_rate as f32 / 2.0;
    let ratio = (f_hi / f_lo).max(1.0);

    let mut edges = Vec::with_capacity(n_bands + 1);
    let mut prev = 1usize.min(n_bins);
    edges.push(prev);

    for k in 1..=n_bands {
        let freq = f_lo * ratio.powf(k as f32 / n_bands as f32);
        let bin = (freq / bin_hz).round() as usize;
        let bin = bin.clamp(prev, n_bins);
        let bin = if bin == prev && prev < n_bins { prev + 1 } else { bin };
        edges.push(bin);
        prev = bin;
    }

    edges
}
