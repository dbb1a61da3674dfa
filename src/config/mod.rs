use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::intonation::ContourError;

/// Tunables for framing, voicing, pitch search and display scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    #[serde(alias = "hopMs")]
    pub hop_ms: f32,
    #[serde(alias = "windowMs")]
    pub window_ms: f32,
    #[serde(alias = "minFrequencyHz", alias = "min_frequency")]
    pub min_frequency_hz: f32,
    #[serde(alias = "maxFrequencyHz", alias = "max_frequency")]
    pub max_frequency_hz: f32,
    /// Every n-th sample feeds the energy and difference sums.
    #[serde(alias = "subsampleStride", alias = "stride")]
    pub subsample_stride: usize,
    /// Mean absolute amplitude below which a frame counts as silent.
    #[serde(alias = "energyThreshold")]
    pub energy_threshold: f32,
    #[serde(alias = "displayFloor")]
    pub display_floor: f32,
    #[serde(alias = "displayCeiling")]
    pub display_ceiling: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            hop_ms: 20.0,
            window_ms: 40.0,
            min_frequency_hz: 75.0,
            max_frequency_hz: 600.0,
            subsample_stride: 4,
            energy_threshold: 0.01,
            display_floor: 10.0,
            display_ceiling: 90.0,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ContourError> {
        let positive = [
            ("hop_ms", self.hop_ms),
            ("window_ms", self.window_ms),
            ("min_frequency_hz", self.min_frequency_hz),
            ("max_frequency_hz", self.max_frequency_hz),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ContourError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.min_frequency_hz >= self.max_frequency_hz {
            return Err(ContourError::InvalidConfig(format!(
                "min_frequency_hz ({}) must be below max_frequency_hz ({})",
                self.min_frequency_hz, self.max_frequency_hz
            )));
        }
        if self.subsample_stride == 0 {
            return Err(ContourError::InvalidConfig(
                "subsample_stride must be at least 1".to_string(),
            ));
        }
        if !(self.energy_threshold.is_finite() && self.energy_threshold >= 0.0) {
            return Err(ContourError::InvalidConfig(format!(
                "energy_threshold must be non-negative, got {}",
                self.energy_threshold
            )));
        }
        // Zero marks silence, so the lowest voiced value must land above it.
        if !(self.display_floor > 0.0
            && self.display_ceiling <= 100.0
            && self.display_floor < self.display_ceiling)
        {
            return Err(ContourError::InvalidConfig(format!(
                "display range [{}, {}] must be increasing and within (0, 100]",
                self.display_floor, self.display_ceiling
            )));
        }
        Ok(())
    }

    /// Resolve millisecond and frequency settings into sample counts for `sample_rate`.
    pub fn geometry(&self, sample_rate: u32) -> Result<FrameGeometry, ContourError> {
        self.validate()?;
        let rate = sample_rate as f64;
        let hop_size = (rate * self.hop_ms as f64 / 1000.0).floor() as usize;
        let window_size = (rate * self.window_ms as f64 / 1000.0).floor() as usize;
        let min_lag = (rate / self.max_frequency_hz as f64).floor() as usize;
        let max_lag = (rate / self.min_frequency_hz as f64).floor() as usize;

        if hop_size == 0 {
            return Err(ContourError::InvalidConfig(format!(
                "hop of {} ms is shorter than one sample at {sample_rate} Hz",
                self.hop_ms
            )));
        }
        if min_lag == 0 {
            return Err(ContourError::InvalidConfig(format!(
                "sample rate {sample_rate} Hz cannot resolve {} Hz",
                self.max_frequency_hz
            )));
        }
        if window_size <= max_lag {
            return Err(ContourError::InvalidConfig(format!(
                "window of {window_size} samples must exceed the maximum lag of {max_lag}"
            )));
        }

        Ok(FrameGeometry {
            sample_rate,
            hop_size,
            window_size,
            min_lag,
            max_lag,
            stride: self.subsample_stride,
        })
    }
}

/// Sample-domain framing and lag bounds derived from [`AnalysisConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    pub sample_rate: u32,
    pub hop_size: usize,
    pub window_size: usize,
    pub min_lag: usize,
    pub max_lag: usize,
    pub stride: usize,
}

impl FrameGeometry {
    pub fn frame_count(&self, sample_count: usize) -> usize {
        if sample_count < self.window_size {
            0
        } else {
            (sample_count - self.window_size) / self.hop_size + 1
        }
    }
}

/// Load analysis settings from a JSON file, or fall back to the defaults.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    let config = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read analysis config {:?}", path))?;
            parse_config(&raw).with_context(|| format!("invalid analysis config {:?}", path))?
        }
        None => AnalysisConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn parse_config(raw: &str) -> Result<AnalysisConfig> {
    let config: AnalysisConfig =
        serde_json::from_str(raw).context("failed to parse analysis config JSON")?;
    Ok(config)
}
