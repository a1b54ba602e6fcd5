//! Envelope conditioning filters
//!
//! Two moving-average passes shape the raw flux into a usable onset
//! envelope: a short centered average suppresses frame-level noise, then a
//! longer local mean is subtracted (and negatives clipped) so slow energy
//! trends like crescendos do not read as onsets.

/// Centered moving average
///
/// The window shrinks near the signal edges so the output keeps the input
/// length. A window of 0 or 1 returns the signal unchanged.
pub fn moving_average(signal: &[f32], window: usize) -> Vec<f32> {
    if signal.is_empty() || window <= 1 {
        return signal.to_vec();
    }

    let prefix = prefix_sums(signal);
    let half = window / 2;

    (0..signal.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(signal.len());
            (prefix[hi] - prefix[lo]) / (hi - lo) as f32
        })
        .collect()
}

/// Subtract a centered local mean and clip negatives to zero
///
/// This is the half-wave-rectified detrending step: output values are the
/// signal's excess over its local neighborhood average, never negative.
pub fn subtract_local_mean(signal: &[f32], window: usize) -> Vec<f32> {
    if signal.is_empty() {
        return Vec::new();
    }

    if window <= 1 {
        return signal.iter().map(|&v| v.max(0.0)).collect();
    }

    let prefix = prefix_sums(signal);
    let half = window / 2;

    (0..signal.len())
        .map(|i| {
            let lo = i.saturating_sub(half);
            let hi = (i + half + 1).min(signal.len());
            let mean = (prefix[hi] - prefix[lo]) / (hi - lo) as f32;
            (signal[i] - mean).max(0.0)
        })
        .collect()
}

fn prefix_sums(signal: &[f32]) -> Vec<f32> {
    let mut prefix = Vec::with_capacity(signal.len() + 1);
    prefix.push(0.0f32);
    let mut acc = 0.0f32;
    for &v in signal {
        acc += v;
        prefix.push(acc);
    }
    prefix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_average_preserves_constant() {
        let signal = vec![2.0f32; 20];
        let smoothed = moving_average(&signal, 5);
        assert_eq!(smoothed.len(), 20);
        for v in smoothed {
            assert!((v - 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_moving_average_spreads_impulse() {
        let mut signal = vec![0.0f32; 11];
        signal[5] = 3.0;
        let smoothed = moving_average(&signal, 3);
        assert!((smoothed[5] - 1.0).abs() < 1e-6);
        assert!((smoothed[4] - 1.0).abs() < 1e-6);
        assert!((smoothed[6] - 1.0).abs() < 1e-6);
        assert_eq!(smoothed[3], 0.0);
    }

    #[test]
    fn test_local_mean_removes_constant_trend() {
        let signal = vec![4.0f32; 30];
        let detrended = subtract_local_mean(&signal, 9);
        assert!(detrended.iter().all(|&v| v.abs() < 1e-6));
    }

    #[test]
    fn test_local_mean_keeps_impulse_positive_and_clips_dips() {
        let mut signal = vec![1.0f32; 31];
        signal[15] = 5.0;
        signal[20] = 0.0; // dip below the local mean
        let detrended = subtract_local_mean(&signal, 7);
        assert!(detrended[15] > 0.0);
        assert_eq!(detrended[20], 0.0);
        assert!(detrended.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_window_of_one_passes_through() {
        let signal = vec![1.0, -2.0, 3.0];
        assert_eq!(moving_average(&signal, 1), signal);
        assert_eq!(subtract_local_mean(&signal, 1), vec![1.0, 0.0, 3.0]);
    }
}
