//! Result assembly
//!
//! Packages the tempo estimate and beat sequence into the terminal result
//! consumed by external collaborators (sidecar writers, game clocks).

pub mod result;
