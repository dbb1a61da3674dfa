//! Average magnitude difference (AMDF) pitch estimation.
//!
//! Each candidate lag between `min_lag` and `max_lag` is scored by the mean
//! absolute difference between the frame and itself shifted by that lag. The
//! lowest score wins and the first lag reaching it is kept, so octave errors are
//! possible and left uncorrected.

use crate::config::FrameGeometry;

use super::Frame;

/// Estimate F0 in Hz for a frame the energy gate has already marked voiced.
pub fn estimate_pitch(frame: &Frame<'_>, geometry: &FrameGeometry) -> f32 {
    let lag = best_lag(
        frame.samples,
        geometry.min_lag,
        geometry.max_lag,
        geometry.stride,
    );
    geometry.sample_rate as f32 / lag as f32
}

/// Lag in `[min_lag, max_lag]` with the smallest mean absolute difference.
pub fn best_lag(samples: &[f32], min_lag: usize, max_lag: usize, stride: usize) -> usize {
    let mut best = min_lag;
    let mut best_score = f32::INFINITY;
    for lag in min_lag..=max_lag {
        let score = magnitude_difference(samples, lag, stride);
        if score < best_score {
            best_score = score;
            best = lag;
        }
    }
    best
}

/// Mean of `|x[i] - x[i + lag]|` over `i = 0, stride, ..` while `i + lag` stays in the frame.
pub fn magnitude_difference(samples: &[f32], lag: usize, stride: usize) -> f32 {
    let span = samples.len().saturating_sub(lag);
    let mut sum = 0.0;
    let mut count = 0usize;
    for i in (0..span).step_by(stride.max(1)) {
        sum += (samples[i] - samples[i + lag]).abs();
        count += 1;
    }
    if count == 0 {
        return f32::INFINITY;
    }
    sum / count as f32
}
