//! Log-normal tempo prior
//!
//! Autocorrelation alone is octave-ambiguous: a 120 BPM pulse also produces
//! ACF peaks at 60 BPM (and often 240 BPM). Weighting candidates by a
//! log-normal prior centered on a typical tempo biases the search toward
//! the perceptually likely octave without ruling the others out.

/// Weight for a candidate tempo under a log-normal prior
///
/// The prior is Gaussian in log2(BPM), so "one octave away" costs the same
/// whether the candidate is double or half the center tempo.
///
/// # Arguments
///
/// * `bpm` - Candidate tempo
/// * `prior_bpm` - Center of the prior (e.g. 120.0)
/// * `octave_sigma` - Width of the prior in octaves
///
/// # Returns
///
/// Weight in (0, 1], 1.0 exactly at the prior center
pub fn octave_prior_weight(bpm: f32, prior_bpm: f32, octave_sigma: f32) -> f32 {
    let octaves = (bpm / prior_bpm).log2();
    (-0.5 * (octaves / octave_sigma).powi(2)).exp()
}

/// Distance from the prior center in octaves (absolute)
///
/// Used as the tie-break criterion when two candidate lags score nearly
/// equally: prefer the one closer to the prior center.
pub fn octave_distance(bpm: f32, prior_bpm: f32) -> f32 {
    (bpm / prior_bpm).log2().abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_peaks_at_center() {
        assert!((octave_prior_weight(120.0, 120.0, 1.0) - 1.0).abs() < 1e-6);
        assert!(octave_prior_weight(60.0, 120.0, 1.0) < 1.0);
        assert!(octave_prior_weight(240.0, 120.0, 1.0) < 1.0);
    }

    #[test]
    fn test_weight_symmetric_in_octaves() {
        let down = octave_prior_weight(60.0, 120.0, 1.0);
        let up = octave_prior_weight(240.0, 120.0, 1.0);
        assert!((down - up).abs() < 1e-6);
    }

    #[test]
    fn test_narrower_sigma_penalizes_harder() {
        let wide = octave_prior_weight(60.0, 120.0, 1.0);
        let narrow = octave_prior_weight(60.0, 120.0, 0.5);
        assert!(narrow < wide);
    }

    #[test]
    fn test_octave_distance() {
        assert!((octave_distance(120.0, 120.0)).abs() < 1e-6);
        assert!((octave_distance(60.0, 120.0) - 1.0).abs() < 1e-6);
        assert!((octave_distance(240.0, 120.0) - 1.0).abs() < 1e-6);
    }
}
