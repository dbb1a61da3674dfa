pub mod contour;
pub mod energy;
pub mod pitch;

use tracing::{debug, warn};

use crate::config::{AnalysisConfig, FrameGeometry};
use crate::intonation::Result;
use crate::types::AudioData;

use contour::{normalize, raw_pitch_contour, trim_silence};

/// A borrowed analysis window; `index` counts hops from the start of the buffer.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub index: usize,
    pub samples: &'a [f32],
}

/// Walk `samples` in windows of `geometry.window_size`, stepping by `geometry.hop_size`.
///
/// Trailing samples that cannot fill a whole window are not visited.
pub fn frames<'a>(
    samples: &'a [f32],
    geometry: &FrameGeometry,
) -> impl Iterator<Item = Frame<'a>> + 'a {
    let count = geometry.frame_count(samples.len());
    let hop = geometry.hop_size;
    let window = geometry.window_size;
    (0..count).map(move |index| {
        let start = index * hop;
        Frame {
            index,
            samples: &samples[start..start + window],
        }
    })
}

/// Turns decoded audio into trimmed, display-scaled pitch contours.
#[derive(Debug, Clone)]
pub struct ContourExtractor {
    config: AnalysisConfig,
}

impl ContourExtractor {
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Per-frame F0 in Hz, zero where the energy gate found silence.
    pub fn raw_contour(&self, audio: &AudioData) -> Result<Vec<f32>> {
        audio.validate()?;
        let geometry = self.config.geometry(audio.sample_rate)?;
        if audio.samples.len() < geometry.window_size {
            warn!(
                samples = audio.samples.len(),
                window = geometry.window_size,
                "audio shorter than one analysis window; contour is empty"
            );
        }
        Ok(raw_pitch_contour(
            &audio.samples,
            &geometry,
            self.config.energy_threshold,
        ))
    }

    /// Trimmed contour with voiced values rescaled into the display range.
    pub fn extract(&self, audio: &AudioData) -> Result<Vec<f32>> {
        let raw = self.raw_contour(audio)?;
        let trimmed = trim_silence(&raw);
        let contour = normalize(
            trimmed,
            self.config.display_floor,
            self.config.display_ceiling,
        );
        debug!(
            frames = raw.len(),
            voiced = raw.iter().filter(|v| **v != 0.0).count(),
            trimmed = contour.len(),
            "pitch contour extracted"
        );
        Ok(contour)
    }
}
