use super::Frame;

/// Mean absolute amplitude over every `stride`-th sample of `frame`.
pub fn mean_abs_amplitude(frame: &[f32], stride: usize) -> f32 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for sample in frame.iter().step_by(stride.max(1)) {
        sum += sample.abs();
        count += 1;
    }
    if count == 0 {
        return 0.0;
    }
    sum / count as f32
}

/// Hard energy gate: a frame is voiced unless its level is strictly below `threshold`.
pub fn is_voiced(frame: &Frame<'_>, stride: usize, threshold: f32) -> bool {
    mean_abs_amplitude(frame.samples, stride) >= threshold
}
