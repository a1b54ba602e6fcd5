//! Beat tracking
//!
//! Places beat times on the onset envelope given a global tempo estimate.
//! The dynamic-programming tracker jointly optimizes onset alignment and
//! inter-beat spacing regularity, so it tolerates local tempo drift and
//! syncopation instead of stamping beats at fixed intervals.

pub mod dynamic_programming;

pub use dynamic_programming::track_beats;
