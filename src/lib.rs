//! Pitch-contour comparison for pronunciation practice.
//!
//! Decoded reference and attempt recordings are turned into voiced pitch
//! contours, trimmed, rescaled into a shared display range, and aligned with
//! dynamic time warping so the attempt can be read on the reference's time axis.

pub mod audio;
pub mod cli;
pub mod config;
pub mod intonation;
pub mod types;
