//! Onset strength extraction
//!
//! Converts a raw waveform into a lower-rate onset strength envelope whose
//! peaks align with transient attacks (drum hits, note onsets) independent
//! of absolute loudness:
//! - Banded log-magnitude spectrogram
//! - Spectral flux (half-wave-rectified band-wise difference)
//! - Smoothing and local-mean removal

pub mod smoothing;
pub mod spectral_flux;
pub mod spectrogram;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// Onset strength envelope, one value per analysis hop
///
/// Values are non-negative, smoothed, and have had a longer-window local
/// mean subtracted (with negatives clipped to zero), so slow energy trends
/// do not register as onsets. The envelope length is always
/// `samples.len() / hop_size` (floor).
#[derive(Debug, Clone)]
pub struct OnsetEnvelope {
    /// Onset strength per hop, all values >= 0
    pub values: Vec<f32>,

    /// Envelope rate in frames per second (`sample_rate / hop_size`)
    pub frame_rate: f32,
}

impl OnsetEnvelope {
    /// Number of frames in the envelope
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the envelope contains no frames
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Duration covered by the envelope in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.values.len() as f32 / self.frame_rate
    }
}

/// Extract an onset strength envelope from a mono waveform
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz
/// * `config` - Analysis configuration (frame size, hop size, band count,
///   smoothing windows)
///
/// # Returns
///
/// An [`OnsetEnvelope`] with one value per hop
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidAudio`] if the buffer is empty, the
/// sample rate is zero, or the waveform is shorter than one analysis frame.
pub fn extract_onset_envelope(
    samples: &[f32],
    sample_rate: u32,
    config: &AnalysisConfig,
) -> Result<OnsetEnvelope, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::InvalidAudio("empty audio samples".to_string()));
    }

    if sample_rate == 0 {
        return Err(AnalysisError::InvalidAudio("sample rate must be > 0".to_string()));
    }

    if config.frame_size == 0 || config.hop_size == 0 {
        return Err(AnalysisError::InvalidAudio(
            "frame size and hop size must be > 0".to_string(),
        ));
    }

    if samples.len() < config.frame_size {
        return Err(AnalysisError::InvalidAudio(format!(
            "waveform has {} samples, shorter than one analysis frame ({})",
            samples.len(),
            config.frame_size
        )));
    }

    log::debug!(
        "Extracting onset envelope: {} samples at {} Hz, frame={}, hop={}, {} bands",
        samples.len(),
        sample_rate,
        config.frame_size,
        config.hop_size,
        config.n_bands
    );

    let banded = spectrogram::banded_log_spectrogram(
        samples,
        sample_rate,
        config.frame_size,
        config.hop_size,
        config.n_bands,
    );

    let flux = spectral_flux::spectral_flux(&banded);
    let smoothed = smoothing::moving_average(&flux, config.smoothing_window);
    let values = smoothing::subtract_local_mean(&smoothed, config.local_mean_window);

    let frame_rate = sample_rate as f32 / config.hop_size as f32;

    log::debug!(
        "Onset envelope: {} frames at {:.2} fps",
        values.len(),
        frame_rate
    );

    Ok(OnsetEnvelope { values, frame_rate })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click_track(bpm: f32, duration_secs: f32, sample_rate: u32) -> Vec<f32> {
        let n = (duration_secs * sample_rate as f32) as usize;
        let mut samples = vec![0.0f32; n];
        let period = (60.0 / bpm * sample_rate as f32) as usize;
        let mut pos = 0;
        while pos < n {
            for i in 0..(sample_rate as usize / 100).min(n - pos) {
                let t = i as f32 / sample_rate as f32;
                samples[pos + i] += 0.8 * (-t * 200.0).exp()
                    * (2.0 * std::f32::consts::PI * 1000.0 * t).sin();
            }
            pos += period;
        }
        samples
    }

    #[test]
    fn test_empty_samples_rejected() {
        let result = extract_onset_envelope(&[], 44100, &AnalysisConfig::default());
        assert!(matches!(result, Err(AnalysisError::InvalidAudio(_))));
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let samples = vec![0.0f32; 44100];
        let result = extract_onset_envelope(&samples, 0, &AnalysisConfig::default());
        assert!(matches!(result, Err(AnalysisError::InvalidAudio(_))));
    }

    #[test]
    fn test_sub_frame_waveform_rejected() {
        let samples = vec![0.0f32; 100];
        let result = extract_onset_envelope(&samples, 44100, &AnalysisConfig::default());
        assert!(matches!(result, Err(AnalysisError::InvalidAudio(_))));
    }

    #[test]
    fn test_envelope_length_invariant() {
        let config = AnalysisConfig::default();
        let samples = vec![0.1f32; 44100 * 5 + 137];
        let envelope = extract_onset_envelope(&samples, 44100, &config).unwrap();
        assert_eq!(envelope.len(), samples.len() / config.hop_size);
    }

    #[test]
    fn test_envelope_non_negative() {
        let samples = click_track(120.0, 8.0, 44100);
        let envelope =
            extract_onset_envelope(&samples, 44100, &AnalysisConfig::default()).unwrap();
        assert!(envelope.values.iter().all(|&v| v >= 0.0));
        assert!(envelope.values.iter().all(|&v| v.is_finite()));
    }

    #[test]
    fn test_clicks_produce_peaks_near_click_frames() {
        let config = AnalysisConfig::default();
        let sample_rate = 44100;
        let samples = click_track(120.0, 8.0, sample_rate);
        let envelope = extract_onset_envelope(&samples, sample_rate, &config).unwrap();

        // Second click lands at 0.5s; the envelope peak in its neighborhood
        // should dominate the quiet stretch between clicks.
        let click_frame = (0.5 * envelope.frame_rate) as usize;
        let near: f32 = envelope.values[click_frame.saturating_sub(2)..click_frame + 3]
            .iter()
            .copied()
            .fold(0.0, f32::max);
        let far: f32 = envelope.values[click_frame + 10..click_frame + 25]
            .iter()
            .copied()
            .fold(0.0, f32::max);
        assert!(
            near > far * 2.0,
            "click frame strength {:.4} should dominate inter-click strength {:.4}",
            near,
            far
        );
    }
}
