pub mod alignment;
pub mod features;

use std::f32::consts::TAU;
use std::thread;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::AnalysisConfig;
use crate::types::AudioData;

use features::ContourExtractor;

/// Number of points in the synthetic pair substituted when decoding fails upstream.
pub const DEFAULT_PLACEHOLDER_LEN: usize = 50;

/// Convenient alias for results returned by the contour pipeline.
pub type Result<T> = std::result::Result<T, ContourError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContourError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid analysis config: {0}")]
    InvalidConfig(String),
}

/// One charted value: frame index on the reference axis and a value in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourPoint {
    pub position: usize,
    pub value: f32,
}

/// Reference contour and the attempt warped onto the reference's frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContourPair {
    pub reference: Vec<ContourPoint>,
    pub attempt: Vec<ContourPoint>,
}

impl ContourPair {
    /// Pair two equal-length value sequences by frame index.
    pub fn from_values(reference: &[f32], attempt: &[f32]) -> Self {
        debug_assert_eq!(reference.len(), attempt.len());
        Self {
            reference: to_points(reference),
            attempt: to_points(attempt),
        }
    }

    /// Smooth stand-in pair for callers whose upstream decode failed.
    pub fn placeholder(len: usize) -> Self {
        let wave = |offset: f32| -> Vec<f32> {
            (0..len)
                .map(|i| {
                    let phase = TAU * i as f32 / len.max(1) as f32;
                    50.0 + 30.0 * (phase - offset).sin()
                })
                .collect()
        };
        Self::from_values(&wave(0.0), &wave(0.4))
    }

    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }
}

fn to_points(values: &[f32]) -> Vec<ContourPoint> {
    values
        .iter()
        .enumerate()
        .map(|(position, &value)| ContourPoint { position, value })
        .collect()
}

/// Extract both contours and warp the attempt onto the reference's time axis.
///
/// The two extractions are independent and run on scoped threads.
pub fn analyze(
    reference: &AudioData,
    attempt: &AudioData,
    config: &AnalysisConfig,
) -> Result<ContourPair> {
    let extractor = ContourExtractor::new(config.clone())?;

    let (reference_contour, attempt_contour) = thread::scope(|scope| {
        let attempt_job = scope.spawn(|| extractor.extract(attempt));
        let reference_contour = extractor.extract(reference);
        let attempt_contour = attempt_job
            .join()
            .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
        (reference_contour, attempt_contour)
    });
    let reference_contour = reference_contour?;
    let attempt_contour = attempt_contour?;

    let alignment = alignment::align(&reference_contour, &attempt_contour);
    debug!(
        reference_frames = reference_contour.len(),
        attempt_frames = attempt_contour.len(),
        path_len = alignment.path.len(),
        total_cost = alignment.total_cost,
        "contours aligned"
    );
    Ok(ContourPair::from_values(
        &reference_contour,
        &alignment.aligned,
    ))
}
