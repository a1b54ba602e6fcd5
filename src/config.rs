//! Configuration parameters for beat map analysis

/// Analysis configuration parameters
///
/// All tunable numeric parameters of the pipeline live here; there is no
/// hidden module-level state. `Default` gives values suitable for typical
/// 44.1 kHz music tracks.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    // STFT parameters
    /// Frame size for the short-time spectrum (default: 1024)
    pub frame_size: usize,

    /// Hop size between frames in samples (default: 512)
    pub hop_size: usize,

    /// Number of log-spaced frequency bands for spectral flux (default: 32)
    pub n_bands: usize,

    // Onset envelope conditioning
    /// Centered moving-average window for flux smoothing, in frames (default: 3)
    pub smoothing_window: usize,

    /// Window for the local-mean subtraction that removes slow energy
    /// trends, in frames (default: 45, roughly half a second at 512 hop)
    pub local_mean_window: usize,

    // Tempo search
    /// Minimum BPM to consider (default: 40.0)
    pub min_bpm: f32,

    /// Maximum BPM to consider (default: 240.0)
    pub max_bpm: f32,

    /// Center of the log-normal tempo prior in BPM (default: 120.0)
    ///
    /// The prior biases the tempo search against octave errors (picking 2x
    /// or 0.5x the true tempo) without ruling either out.
    pub prior_bpm: f32,

    /// Width of the tempo prior in octaves (default: 1.0)
    pub prior_octave_sigma: f32,

    /// Minimum onset-envelope duration in seconds for tempo estimation
    /// (default: 4.0)
    pub min_signal_secs: f32,

    /// Minimum normalized autocorrelation peak required to accept a tempo
    /// (default: 0.1); signals below this are treated as aperiodic
    pub min_periodicity: f32,

    // Beat tracking
    /// Penalty weight for deviating from the expected beat period in the
    /// dynamic-programming tracker (default: 100.0)
    ///
    /// Higher values enforce a stiffer pulse; lower values allow more local
    /// tempo drift.
    pub tightness: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_size: 1024,
            hop_size: 512,
            n_bands: 32,
            smoothing_window: 3,
            local_mean_window: 45,
            min_bpm: 40.0,
            max_bpm: 240.0,
            prior_bpm: 120.0,
            prior_octave_sigma: 1.0,
            min_signal_secs: 4.0,
            min_periodicity: 0.1,
            tightness: 100.0,
        }
    }
}
