use std::f32::consts::TAU;
use std::fs;
use std::path::Path;

use assert_cmd::Command;
use hound::{SampleFormat, WavSpec, WavWriter};
use predicates::prelude::*;
use serde_json::Value;

const SAMPLE_RATE: u32 = 16_000;

#[test]
fn prints_equal_length_contours_for_two_recordings() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.wav");
    let attempt = dir.path().join("attempt.wav");
    write_tone(&reference, &[(130.0, 0.4), (190.0, 0.4)]);
    write_tone(&attempt, &[(130.0, 0.25), (190.0, 0.25)]);

    let output = Command::cargo_bin("intonalyzer")
        .unwrap()
        .arg(&reference)
        .arg(&attempt)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let pair: Value = serde_json::from_slice(&output.stdout).unwrap();
    let reference_points = pair["reference"].as_array().unwrap();
    let attempt_points = pair["attempt"].as_array().unwrap();
    assert!(!reference_points.is_empty());
    assert_eq!(reference_points.len(), attempt_points.len());
    assert_eq!(reference_points[0]["position"], 0);
}

#[test]
fn writes_pretty_output_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.wav");
    let attempt = dir.path().join("attempt.wav");
    let out = dir.path().join("pair.json");
    write_tone(&reference, &[(130.0, 0.3)]);
    write_tone(&attempt, &[(130.0, 0.3)]);

    Command::cargo_bin("intonalyzer")
        .unwrap()
        .arg(&reference)
        .arg(&attempt)
        .arg("--output")
        .arg(&out)
        .arg("--pretty")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains('\n'));
    let pair: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(pair["reference"], pair["attempt"]);
}

#[test]
fn missing_reference_fails_validation() {
    let dir = tempfile::tempdir().unwrap();
    let attempt = dir.path().join("attempt.wav");
    write_tone(&attempt, &[(130.0, 0.3)]);

    Command::cargo_bin("intonalyzer")
        .unwrap()
        .arg(dir.path().join("missing.wav"))
        .arg(&attempt)
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn fallback_emits_placeholder_when_decoding_fails() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.wav");
    fs::write(&broken, b"not really a wav file").unwrap();

    let output = Command::cargo_bin("intonalyzer")
        .unwrap()
        .arg(&broken)
        .arg(&broken)
        .arg("--fallback")
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let pair: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(pair["reference"].as_array().unwrap().len(), 50);
    assert_eq!(pair["attempt"].as_array().unwrap().len(), 50);
}

#[test]
fn undecodable_input_fails_without_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.wav");
    fs::write(&broken, b"not really a wav file").unwrap();

    Command::cargo_bin("intonalyzer")
        .unwrap()
        .arg(&broken)
        .arg(&broken)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode reference audio"));
}

#[test]
fn rejects_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference.wav");
    let config = dir.path().join("config.json");
    write_tone(&reference, &[(130.0, 0.3)]);
    fs::write(&config, r#"{"min_frequency_hz": 700.0}"#).unwrap();

    Command::cargo_bin("intonalyzer")
        .unwrap()
        .arg(&reference)
        .arg(&reference)
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load analysis settings"));
}

fn write_tone(path: &Path, segments: &[(f32, f32)]) {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    let dt = 1.0 / SAMPLE_RATE as f32;
    let mut phase = 0.0_f32;
    for &(frequency, seconds) in segments {
        for _ in 0..(SAMPLE_RATE as f32 * seconds) as usize {
            phase = (phase + TAU * frequency * dt) % TAU;
            writer
                .write_sample((phase.sin() * 0.4 * i16::MAX as f32) as i16)
                .unwrap();
        }
    }
    writer.finalize().unwrap();
}
