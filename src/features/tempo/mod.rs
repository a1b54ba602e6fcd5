//! Tempo estimation
//!
//! Estimates a single global BPM from the onset envelope's periodicity:
//! - FFT-accelerated autocorrelation over the lag range covering the BPM
//!   search window
//! - Log-normal octave prior to resist double/half-tempo errors
//! - Confidence from peak sharpness relative to the non-peak lags

pub mod autocorrelation;
pub mod prior;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::onset::OnsetEnvelope;

const EPSILON: f32 = 1e-10;

/// Lags within this distance of the winning lag count as part of the peak
/// when computing confidence.
const PEAK_NEIGHBORHOOD: usize = 2;

/// Relative score margin inside which two candidates are considered tied.
const TIE_MARGIN: f32 = 0.999;

/// Global tempo estimate for a track
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoEstimate {
    /// Estimated tempo in BPM
    pub bpm: f32,

    /// Periodicity confidence (0.0-1.0), higher means a cleaner pulse
    pub confidence: f32,
}

/// Estimate the global tempo of an onset envelope
///
/// # Arguments
///
/// * `envelope` - Onset strength envelope
/// * `config` - Analysis configuration (BPM range, prior, thresholds)
///
/// # Returns
///
/// A [`TempoEstimate`] with BPM inside the configured search range
///
/// # Errors
///
/// Returns [`AnalysisError::TempoNotFound`] if:
/// - The envelope covers less than `config.min_signal_secs` seconds
/// - The envelope carries no energy (e.g. silence)
/// - The strongest in-range autocorrelation peak falls below
///   `config.min_periodicity` (aperiodic signal)
pub fn estimate_tempo(
    envelope: &OnsetEnvelope,
    config: &AnalysisConfig,
) -> Result<TempoEstimate, AnalysisError> {
    let duration = envelope.duration_seconds();
    if duration < config.min_signal_secs {
        return Err(AnalysisError::TempoNotFound(format!(
            "onset envelope covers {:.2}s, need at least {:.1}s",
            duration, config.min_signal_secs
        )));
    }

    log::debug!(
        "Estimating tempo: {} frames ({:.2}s), range [{:.0}, {:.0}] BPM",
        envelope.len(),
        duration,
        config.min_bpm,
        config.max_bpm
    );

    let acf = autocorrelation::autocorrelate(&envelope.values);
    let energy = acf[0];
    if energy < EPSILON {
        return Err(AnalysisError::TempoNotFound(
            "onset envelope has no energy".to_string(),
        ));
    }

    // lag = frame_rate * 60 / bpm
    let frame_rate = envelope.frame_rate;
    let lag_min = ((frame_rate * 60.0 / config.max_bpm).ceil() as usize).max(1);
    let lag_max = ((frame_rate * 60.0 / config.min_bpm).floor() as usize).min(acf.len() - 1);

    if lag_min > lag_max {
        return Err(AnalysisError::TempoNotFound(format!(
            "signal too short for BPM range [{:.0}, {:.0}]",
            config.min_bpm, config.max_bpm
        )));
    }

    // Weighted search over in-range lags.
    let mut best_lag = lag_min;
    let mut best_score = f32::MIN;
    for lag in lag_min..=lag_max {
        let bpm = frame_rate * 60.0 / lag as f32;
        let score = (acf[lag] / energy)
            * prior::octave_prior_weight(bpm, config.prior_bpm, config.prior_octave_sigma);
        if score > best_score {
            best_score = score;
            best_lag = lag;
        }
    }

    // Tie-break: among candidates within 1 BPM and within a hair of the
    // winning score, prefer the one closest to the prior center.
    let best_bpm = frame_rate * 60.0 / best_lag as f32;
    for lag in lag_min..=lag_max {
        if lag == best_lag {
            continue;
        }
        let bpm = frame_rate * 60.0 / lag as f32;
        if (bpm - best_bpm).abs() > 1.0 {
            continue;
        }
        let score = (acf[lag] / energy)
            * prior::octave_prior_weight(bpm, config.prior_bpm, config.prior_octave_sigma);
        if score >= best_score * TIE_MARGIN
            && prior::octave_distance(bpm, config.prior_bpm)
                < prior::octave_distance(best_bpm, config.prior_bpm)
        {
            best_lag = lag;
        }
    }

    let peak = acf[best_lag] / energy;
    if peak < config.min_periodicity {
        return Err(AnalysisError::TempoNotFound(format!(
            "no detectable periodicity (peak {:.3} below {:.3})",
            peak, config.min_periodicity
        )));
    }

    let bpm = frame_rate * 60.0 / best_lag as f32;
    let confidence = peak_sharpness(&acf, energy, best_lag, lag_min, lag_max);

    log::debug!(
        "Tempo estimate: {:.2} BPM at lag {} (peak {:.3}, confidence {:.3})",
        bpm,
        best_lag,
        peak,
        confidence
    );

    Ok(TempoEstimate { bpm, confidence })
}

/// Confidence as normalized peak sharpness
///
/// Compares the winning peak against the mean of the remaining in-range
/// lags (excluding a small neighborhood around the peak itself). A clean
/// pulse leaves the off-peak lags near zero, giving confidence near 1;
/// smeared or noisy periodicity drags it down.
fn peak_sharpness(acf: &[f32], energy: f32, best_lag: usize, lag_min: usize, lag_max: usize) -> f32 {
    let peak = acf[best_lag] / energy;
    if peak < EPSILON {
        return 0.0;
    }

    let mut sum = 0.0f32;
    let mut count = 0usize;
    for lag in lag_min..=lag_max {
        if lag.abs_diff(best_lag) <= PEAK_NEIGHBORHOOD {
            continue;
        }
        sum += acf[lag] / energy;
        count += 1;
    }

    if count == 0 {
        return 1.0;
    }

    (1.0 - (sum / count as f32) / peak).clamp(0.0, 1.0)
}
