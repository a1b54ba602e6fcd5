//! # Beatmap DSP
//!
//! Tempo estimation and beat tracking for synchronizing visuals or gameplay
//! to music. Takes a decoded mono waveform and produces a global BPM plus
//! per-beat millisecond timestamps.
//!
//! ## Quick Start
//!
//! ```no_run
//! use beatmap_dsp::{analyze_waveform, AnalysisConfig};
//!
//! // Decoded audio (mono, f32, normalized) from your loader of choice
//! let samples: Vec<f32> = vec![];
//! let sample_rate = 44100;
//!
//! let result = analyze_waveform(&samples, sample_rate, AnalysisConfig::default())?;
//!
//! println!("BPM: {:.1} (confidence: {:.2})", result.bpm, result.confidence);
//! println!("{} beats, first at {} ms", result.beats.len(), result.beats[0]);
//! # Ok::<(), beatmap_dsp::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! The pipeline runs four strictly sequential stages:
//!
//! ```text
//! Waveform → Onset Strength → Tempo Estimate → Beat Tracking → Beat Map
//! ```
//!
//! Decoding, batch iteration, and sidecar writing are the caller's
//! responsibility; the core is pure computation with no I/O, no global
//! state, and no internal threading. Tracks are independent, so a batch
//! driver can run one pipeline invocation per worker (see
//! `demos/batch_beatmaps.rs`).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;

// Re-export main types
pub use analysis::result::{BeatMapResult, BeatMapSidecar, TrackMetadata};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use features::tempo::TempoEstimate;

/// Analyze a waveform and produce its beat map
///
/// Runs the full pipeline: onset strength extraction, tempo estimation,
/// dynamic-programming beat tracking, and result assembly.
///
/// # Arguments
///
/// * `samples` - Mono audio samples, normalized to [-1.0, 1.0]
/// * `sample_rate` - Sample rate in Hz (typically 44100 or 48000)
/// * `config` - Analysis configuration parameters
///
/// # Returns
///
/// A [`BeatMapResult`] with BPM, confidence, and strictly increasing beat
/// timestamps in milliseconds
///
/// # Errors
///
/// * [`AnalysisError::InvalidAudio`] - empty buffer, zero sample rate, or
///   waveform shorter than one analysis frame
/// * [`AnalysisError::TempoNotFound`] - signal too short (under
///   `config.min_signal_secs`) or no detectable periodicity
/// * [`AnalysisError::BeatTracking`] - tempo found but no beat sequence
///   scores acceptably
///
/// A track either yields a complete valid result or one of these errors;
/// partial results are never returned.
pub fn analyze_waveform(
    samples: &[f32],
    sample_rate: u32,
    config: AnalysisConfig,
) -> Result<BeatMapResult, AnalysisError> {
    use std::time::Instant;
    let start_time = Instant::now();

    log::debug!(
        "Starting beat analysis: {} samples at {} Hz",
        samples.len(),
        sample_rate
    );

    let envelope = features::onset::extract_onset_envelope(samples, sample_rate, &config)?;
    let tempo = features::tempo::estimate_tempo(&envelope, &config)?;
    let beat_times = features::beat_tracking::track_beats(&envelope, &tempo, &config)?;

    let metadata = TrackMetadata {
        duration_seconds: samples.len() as f32 / sample_rate as f32,
        sample_rate,
        processing_time_ms: start_time.elapsed().as_secs_f32() * 1000.0,
    };

    let result = analysis::result::assemble(&tempo, &beat_times, metadata);

    log::debug!(
        "Beat analysis complete: {:.2} BPM, {} beats in {:.1} ms",
        result.bpm,
        result.beats.len(),
        result.metadata.processing_time_ms
    );

    Ok(result)
}
