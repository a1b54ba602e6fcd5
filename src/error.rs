//! Error types for the beat analysis pipeline

use std::fmt;

/// Errors that can occur while turning a waveform into a beat map
///
/// Each variant maps to one failure class the batch driver is expected to
/// handle per track: skip the file (`InvalidAudio`), fall back to a default
/// tempo or skip (`TempoNotFound`), or emit the BPM without beat timestamps
/// (`BeatTracking`). A failed track never produces a partial result.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Malformed input: empty buffer, non-positive sample rate, or a
    /// waveform shorter than a single analysis frame
    InvalidAudio(String),

    /// The onset envelope is too short or carries no detectable periodicity
    TempoNotFound(String),

    /// A tempo was found but no beat sequence scored acceptably
    BeatTracking(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidAudio(msg) => write!(f, "Invalid audio: {}", msg),
            AnalysisError::TempoNotFound(msg) => write!(f, "Tempo not found: {}", msg),
            AnalysisError::BeatTracking(msg) => write!(f, "Beat tracking failed: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_reason() {
        let err = AnalysisError::TempoNotFound("signal too short".to_string());
        assert!(err.to_string().contains("signal too short"));
        assert!(err.to_string().starts_with("Tempo not found"));
    }
}
