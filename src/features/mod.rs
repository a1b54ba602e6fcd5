//! Feature extraction modules
//!
//! The three signal-processing stages of the pipeline:
//! - Onset strength extraction (spectral flux envelope)
//! - Tempo estimation (autocorrelation with an octave prior)
//! - Beat tracking (dynamic programming over the onset envelope)

pub mod beat_tracking;
pub mod onset;
pub mod tempo;
