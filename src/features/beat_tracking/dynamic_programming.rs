//! Dynamic-programming beat tracker
//!
//! Forward pass: every frame t is scored as
//! `C(t) = O(t) + max(0, max_{t'} [C(t') - tightness * ln^2((t - t') / tau)])`
//! where tau is the expected beat period in frames and t' ranges over
//! `[t - 2*tau, t - tau/2]`. The log-ratio penalty is zero when the spacing
//! matches the period exactly and grows quadratically as it deviates, which
//! is what lets the tracker absorb local drift while preferring a steady
//! pulse. Back-pointers recorded during the forward pass are then traced
//! from the best-scoring frame near the end of the signal to recover the
//! whole beat sequence.

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::features::onset::OnsetEnvelope;
use crate::features::tempo::TempoEstimate;

const EPSILON: f32 = 1e-10;

/// Minimum cumulative score for a beat sequence to count as a coherent
/// pulse, in units of envelope standard deviations.
const MIN_TOTAL_SCORE: f32 = 1.0;

/// Minimum normalized onset strength for a beat to count as supported by
/// the envelope rather than interpolated through silence.
const MIN_BEAT_SUPPORT: f32 = 0.1;

/// Track beat times through the onset envelope
///
/// # Arguments
///
/// * `envelope` - Onset strength envelope
/// * `tempo` - Global tempo estimate from [`crate::features::tempo::estimate_tempo`]
/// * `config` - Analysis configuration (`tightness`)
///
/// # Returns
///
/// Strictly increasing beat times in seconds; consecutive beats are always
/// at least half a beat period apart by construction.
///
/// # Errors
///
/// Returns [`AnalysisError::BeatTracking`] if the envelope has no usable
/// energy, the best cumulative score stays below the coherence minimum, or
/// fewer than two beats can be recovered.
pub fn track_beats(
    envelope: &OnsetEnvelope,
    tempo: &TempoEstimate,
    config: &AnalysisConfig,
) -> Result<Vec<f32>, AnalysisError> {
    let n = envelope.len();
    if n < 2 {
        return Err(AnalysisError::BeatTracking(
            "onset envelope too short to track".to_string(),
        ));
    }

    let period = envelope.frame_rate * 60.0 / tempo.bpm;
    if !period.is_finite() || period < 1.0 {
        return Err(AnalysisError::BeatTracking(format!(
            "beat period {:.2} frames is below envelope resolution",
            period
        )));
    }

    log::debug!(
        "Tracking beats: {} frames, {:.2} BPM (period {:.2} frames, tightness {:.0})",
        n,
        tempo.bpm,
        period,
        config.tightness
    );

    // Normalize by the envelope's spread so tightness is scale-invariant.
    let mean = envelope.values.iter().sum::<f32>() / n as f32;
    let variance = envelope
        .values
        .iter()
        .map(|&v| (v - mean) * (v - mean))
        .sum::<f32>()
        / n as f32;
    let std = variance.sqrt();
    if std < EPSILON {
        return Err(AnalysisError::BeatTracking(
            "onset envelope has no energy to track".to_string(),
        ));
    }
    let strength: Vec<f32> = envelope.values.iter().map(|&v| v / std).collect();

    // Forward pass with back-pointers.
    let window_lo = (2.0 * period).round() as usize;
    let window_hi = (0.5 * period).round() as usize;

    let mut cumscore = vec![0.0f32; n];
    let mut backlink: Vec<Option<usize>> = vec![None; n];

    for t in 0..n {
        let mut best = f32::NEG_INFINITY;
        let mut best_prev = None;

        if t >= window_hi {
            let lo = t.saturating_sub(window_lo);
            let hi = t - window_hi;
            for prev in lo..=hi {
                let spacing = (t - prev) as f32 / period;
                let score = cumscore[prev] - config.tightness * spacing.ln().powi(2);
                if score > best {
                    best = score;
                    best_prev = Some(prev);
                }
            }
        }

        if best > 0.0 {
            cumscore[t] = strength[t] + best;
            backlink[t] = best_prev;
        } else {
            cumscore[t] = strength[t];
        }
    }

    // Start the traceback at the best-scoring frame within the final beat
    // period, so a quiet outro does not truncate the sequence.
    let tail = n.saturating_sub(period.round() as usize).min(n - 1);
    let (last_beat, best_score) = cumscore
        .iter()
        .enumerate()
        .skip(tail)
        .map(|(i, &s)| (i, s))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or((n - 1, cumscore[n - 1]));

    if best_score < MIN_TOTAL_SCORE {
        return Err(AnalysisError::BeatTracking(format!(
            "no coherent pulse (best score {:.3})",
            best_score
        )));
    }

    let mut beats = Vec::new();
    let mut t = last_beat;
    beats.push(t);
    while let Some(prev) = backlink[t] {
        t = prev;
        beats.push(t);
    }
    beats.reverse();

    if beats.len() < 2 {
        return Err(AnalysisError::BeatTracking(format!(
            "only {} beat recovered, need at least 2",
            beats.len()
        )));
    }

    // The zero-penalty path lets the DP coast through silence at exact
    // period spacing, so a lone accent could fabricate a full grid. Require
    // that most recovered beats sit on actual onset strength.
    let supported = beats
        .iter()
        .filter(|&&frame| strength[frame] > MIN_BEAT_SUPPORT)
        .count();
    if supported * 2 < beats.len() {
        return Err(AnalysisError::BeatTracking(format!(
            "only {}/{} beats align with onsets",
            supported,
            beats.len()
        )));
    }

    log::debug!("Tracked {} beats, final score {:.2}", beats.len(), best_score);

    Ok(beats
        .into_iter()
        .map(|frame| frame as f32 / envelope.frame_rate)
        .collect())
}
