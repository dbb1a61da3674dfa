//! Core types shared by the decoder and the contour pipeline

use crate::intonation::{ContourError, Result};

/// Decoded audio (single channel, f32 samples)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioData {
    /// Audio samples, normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz (e.g., 24000)
    pub sample_rate: u32,
}

impl AudioData {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Reject buffers that would feed undefined values into framing.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(ContourError::InvalidInput(
                "sample rate must be positive".to_string(),
            ));
        }
        if self.samples.is_empty() {
            return Err(ContourError::InvalidInput(
                "sample buffer is empty".to_string(),
            ));
        }
        if let Some(index) = self.samples.iter().position(|s| !s.is_finite()) {
            return Err(ContourError::InvalidInput(format!(
                "sample {index} is not finite ({})",
                self.samples[index]
            )));
        }
        Ok(())
    }
}
