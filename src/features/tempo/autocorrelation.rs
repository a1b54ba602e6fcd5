//! FFT-accelerated autocorrelation
//!
//! Computes the autocorrelation of the onset envelope via
//! `ACF = IFFT(|FFT(signal)|^2)`, which is O(n log n) instead of the O(n^2)
//! direct form. Peaks in the ACF at a given lag indicate the envelope
//! repeats with that period, which is how the beat period shows up.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Compute the autocorrelation of a signal
///
/// # Arguments
///
/// * `signal` - Input signal (onset strength envelope)
///
/// # Returns
///
/// Autocorrelation function, same length as the input, with `acf[0]` equal
/// to the signal energy. Returns an empty vector for empty input.
pub fn autocorrelate(signal: &[f32]) -> Vec<f32> {
    let n = signal.len();
    if n == 0 {
        return Vec::new();
    }

    // Zero-pad to at least 2n so the circular correlation is linear.
    let fft_size = (2 * n).next_power_of_two();

    let mut buffer: Vec<Complex<f32>> = signal.iter().map(|&x| Complex::new(x, 0.0)).collect();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(fft_size);
    fft.process(&mut buffer);

    for x in &mut buffer {
        *x = *x * x.conj();
    }

    let ifft = planner.plan_fft_inverse(fft_size);
    ifft.process(&mut buffer);

    let scale = 1.0 / fft_size as f32;
    buffer[..n].iter().map(|x| (x.re * scale).max(0.0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_signal() {
        assert!(autocorrelate(&[]).is_empty());
    }

    #[test]
    fn test_lag_zero_is_energy() {
        let signal = vec![1.0f32, 2.0, 3.0];
        let acf = autocorrelate(&signal);
        let energy: f32 = signal.iter().map(|x| x * x).sum();
        assert!((acf[0] - energy).abs() < 1e-3);
    }

    #[test]
    fn test_periodic_impulses_peak_at_period() {
        // Impulse train with period 40: the ACF inside (0, 60] must peak
        // exactly at lag 40.
        let mut signal = vec![0.0f32; 400];
        for i in (0..400).step_by(40) {
            signal[i] = 1.0;
        }
        let acf = autocorrelate(&signal);

        let (best_lag, _) = acf[1..=60]
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .unwrap();
        assert_eq!(best_lag + 1, 40);
    }

    #[test]
    fn test_output_length_matches_input() {
        let signal = vec![0.5f32; 123];
        assert_eq!(autocorrelate(&signal).len(), 123);
    }
}
