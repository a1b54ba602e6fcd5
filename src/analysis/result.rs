//! Beat map result types

use serde::{Deserialize, Serialize};

use crate::features::tempo::TempoEstimate;

/// Per-track analysis metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackMetadata {
    /// Audio duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Processing time in milliseconds
    pub processing_time_ms: f32,
}

/// Complete beat map for one track
///
/// The only value that escapes the pipeline: a global BPM, its confidence,
/// and the beat timestamps in integer milliseconds from track start,
/// strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatMapResult {
    /// Estimated tempo in BPM
    pub bpm: f32,

    /// Beat detection confidence (0.0-1.0)
    pub confidence: f32,

    /// Beat timestamps in milliseconds from track start
    pub beats: Vec<u64>,

    /// Analysis metadata
    pub metadata: TrackMetadata,
}

/// On-disk sidecar shape consumed by downstream players
///
/// Serializes to `{ "filename": ..., "bpm": ..., "beats": [...] }`, the
/// format game clients read next to each song file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatMapSidecar {
    /// Source audio file name
    pub filename: String,

    /// Estimated tempo in BPM
    pub bpm: f32,

    /// Beat timestamps in milliseconds, strictly increasing
    pub beats: Vec<u64>,
}

impl BeatMapResult {
    /// Build the sidecar interop shape for a given source file name
    pub fn to_sidecar(&self, filename: impl Into<String>) -> BeatMapSidecar {
        BeatMapSidecar {
            filename: filename.into(),
            bpm: self.bpm,
            beats: self.beats.clone(),
        }
    }
}

/// Assemble the final beat map from the tempo estimate and beat times
///
/// Beat times are converted from seconds to integer milliseconds by
/// truncation (`int(t * 1000)`), matching the behavior of the sidecar
/// files already in the wild; rounding would shift some timestamps by 1 ms
/// against existing references. Non-increasing timestamps (impossible at
/// normal beat spacing, but cheap to rule out) are dropped.
///
/// Pure and infallible for valid inputs.
pub fn assemble(
    tempo: &TempoEstimate,
    beat_times: &[f32],
    metadata: TrackMetadata,
) -> BeatMapResult {
    let mut beats = Vec::with_capacity(beat_times.len());
    for &time in beat_times {
        let ms = (time * 1000.0) as u64;
        if beats.last().map_or(true, |&prev| ms > prev) {
            beats.push(ms);
        }
    }

    BeatMapResult {
        bpm: tempo.bpm,
        confidence: tempo.confidence,
        beats,
        metadata,
    }
}
