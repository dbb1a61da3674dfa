use crate::config::FrameGeometry;

use super::energy::is_voiced;
use super::pitch::estimate_pitch;
use super::frames;

/// Gate each frame on energy and estimate F0 for the voiced ones; silence records `0`.
pub fn raw_pitch_contour(samples: &[f32], geometry: &FrameGeometry, threshold: f32) -> Vec<f32> {
    frames(samples, geometry)
        .map(|frame| {
            if is_voiced(&frame, geometry.stride, threshold) {
                estimate_pitch(&frame, geometry)
            } else {
                0.0
            }
        })
        .collect()
}

/// Drop leading and trailing runs of exact zeros; interior pauses are kept.
pub fn trim_silence(contour: &[f32]) -> &[f32] {
    let voiced = |v: &f32| *v != 0.0;
    let (Some(start), Some(end)) = (
        contour.iter().position(voiced),
        contour.iter().rposition(voiced),
    ) else {
        return &[];
    };
    &contour[start..=end]
}

/// Map voiced values from their observed `[min, max]` onto `[floor, ceiling]`.
///
/// Zeros stay zero. A span narrower than 1 is widened to 1 so a flat contour
/// lands on `floor` instead of dividing by zero.
pub fn normalize(contour: &[f32], floor: f32, ceiling: f32) -> Vec<f32> {
    let mut voiced = contour.iter().copied().filter(|v| *v != 0.0).peekable();
    let Some(&first) = voiced.peek() else {
        return contour.to_vec();
    };
    let (min, max) = voiced.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let range = (max - min).max(1.0);
    let scale = ceiling - floor;
    contour
        .iter()
        .map(|&v| {
            if v == 0.0 {
                0.0
            } else {
                (v - min) / range * scale + floor
            }
        })
        .collect()
}
