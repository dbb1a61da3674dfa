use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::config::{load_config, AnalysisConfig};

/// Intonalyzer - pitch contour comparison for pronunciation practice
///
/// Decodes a reference utterance and a recorded attempt, extracts their pitch
/// contours, and prints both on the reference's time axis as JSON.
#[derive(Parser, Debug)]
#[command(name = "intonalyzer")]
#[command(version)]
#[command(about = "Compare the pitch contour of an attempt against a reference", long_about = None)]
pub struct Cli {
    /// Reference utterance (any format symphonia can decode)
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Recorded attempt to compare against the reference
    #[arg(value_name = "ATTEMPT")]
    pub attempt: PathBuf,

    /// JSON file with analysis settings
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write the contour pair here instead of stdout
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Override the energy gate threshold
    #[arg(long, value_name = "LEVEL")]
    pub energy_threshold: Option<f32>,

    /// Override the lowest pitch searched, in Hz
    #[arg(long = "min-frequency", value_name = "HZ")]
    pub min_frequency_hz: Option<f32>,

    /// Override the highest pitch searched, in Hz
    #[arg(long = "max-frequency", value_name = "HZ")]
    pub max_frequency_hz: Option<f32>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Emit a synthetic placeholder pair when decoding fails
    #[arg(long)]
    pub fallback: bool,
}

impl Cli {
    pub fn validate(&self) -> Result<()> {
        if !self.fallback {
            for (label, path) in [("Reference", &self.reference), ("Attempt", &self.attempt)] {
                if !path.exists() {
                    bail!("{} file does not exist: {:?}", label, path);
                }
                if !path.is_file() {
                    bail!("{} path is not a file: {:?}", label, path);
                }
            }
        }

        if let Some(output) = &self.output {
            if output.is_dir() {
                bail!("Output path must be a file, got directory: {:?}", output);
            }
        }

        Ok(())
    }

    /// Settings from `--config` (or defaults) with command-line overrides applied.
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(threshold) = self.energy_threshold {
            config.energy_threshold = threshold;
        }
        if let Some(min) = self.min_frequency_hz {
            config.min_frequency_hz = min;
        }
        if let Some(max) = self.max_frequency_hz {
            config.max_frequency_hz = max;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn parses_positional_inputs_with_defaults() {
        let cli = Cli::try_parse_from(["intonalyzer", "ref.wav", "take.wav"]).unwrap();
        assert_eq!(cli.reference.to_str(), Some("ref.wav"));
        assert_eq!(cli.attempt.to_str(), Some("take.wav"));
        assert!(!cli.pretty);
        assert!(!cli.fallback);
        assert!(cli.output.is_none());
    }

    #[test]
    fn applies_overrides_to_config() {
        let cli = Cli::try_parse_from([
            "intonalyzer",
            "ref.wav",
            "take.wav",
            "--energy-threshold",
            "0.02",
            "--min-frequency",
            "90",
            "--max-frequency",
            "400",
        ])
        .unwrap();
        let config = cli.analysis_config().unwrap();
        assert_eq!(config.energy_threshold, 0.02);
        assert_eq!(config.min_frequency_hz, 90.0);
        assert_eq!(config.max_frequency_hz, 400.0);
        assert_eq!(config.hop_ms, 20.0);
    }

    #[test]
    fn rejects_inverted_frequency_override() {
        let cli = Cli::try_parse_from([
            "intonalyzer",
            "ref.wav",
            "take.wav",
            "--min-frequency",
            "500",
            "--max-frequency",
            "100",
        ])
        .unwrap();
        assert!(cli.analysis_config().is_err());
    }

    #[test]
    fn missing_inputs_fail_validation_without_fallback() {
        let cli = Cli::try_parse_from(["intonalyzer", "/nope/ref.wav", "/nope/take.wav"]).unwrap();
        assert!(cli.validate().is_err());

        let cli = Cli::try_parse_from([
            "intonalyzer",
            "/nope/ref.wav",
            "/nope/take.wav",
            "--fallback",
        ])
        .unwrap();
        assert!(cli.validate().is_ok());
    }
}
