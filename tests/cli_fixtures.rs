use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_similarity_cli"))
}

fn fixture_file(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn stdout_json(output: &Output) -> Value {
    let stdout = String::from_utf8(output.stdout.clone()).expect("stdout UTF-8");
    serde_json::from_str(stdout.trim()).expect("JSON payload on stdout")
}

#[test]
fn score_tempo_shift_is_identical() {
    let output = cli()
        .args([
            "score",
            "--a",
            &fixture_file("clip_reference.json"),
            "--b",
            &fixture_file("clip_tempo_shift.json"),
            "--format",
            "json",
        ])
        .output()
        .expect("failed to run similarity_cli score");
    assert!(
        output.status.success(),
        "CLI exited with {:?}",
        output.status.code()
    );

    let json = stdout_json(&output);
    let tempo = json["similarities"]["tempo"].as_f64().unwrap();
    assert!((tempo - (1.0 - 10.0 / 130.0)).abs() < 1e-9);
    assert_eq!(json["similarities"]["mfcc"], 1.0);
    assert_eq!(json["interpretation"], "IDENTICAL");
}

#[test]
fn score_table_output_names_every_feature() {
    let output = cli()
        .args([
            "score",
            "--a",
            &fixture_file("clip_reference.json"),
            "--b",
            &fixture_file("clip_contrasting.json"),
        ])
        .output()
        .expect("failed to run similarity_cli score");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    for name in [
        "duration",
        "energy",
        "spectral_centroid",
        "spectral_rolloff",
        "mfcc",
        "chroma",
        "tempo",
        "harmonic_ratio",
        "percussive_ratio",
    ] {
        assert!(stdout.contains(name), "missing {name} in {stdout}");
    }
    assert!(stdout.contains("Aggregate similarity"));
}

#[test]
fn score_mismatched_vectors_fails() {
    let output = cli()
        .args([
            "score",
            "--a",
            &fixture_file("clip_reference.json"),
            "--b",
            &fixture_file("clip_mismatched.json"),
        ])
        .output()
        .expect("failed to run mismatched score");
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).expect("stderr UTF-8");
    assert!(
        stderr.contains("cepstral_means"),
        "expected field name in stderr, got {stderr}"
    );
}

#[test]
fn score_missing_file_fails() {
    let output = cli()
        .args([
            "score",
            "--a",
            &fixture_file("does_not_exist.json"),
            "--b",
            &fixture_file("clip_reference.json"),
        ])
        .output()
        .expect("failed to run score with missing file");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn fingerprint_reads_file_argument() {
    let reference = format!("@{}", fixture_file("fingerprint_reference.txt"));
    let output = cli()
        .args([
            "fingerprint",
            "--a",
            &reference,
            "--b",
            "AQADtEmUaEkSRZEGAAAB",
            "--format",
            "json",
        ])
        .output()
        .expect("failed to run similarity_cli fingerprint");
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["length_a"], 20);
    assert_eq!(json["identical"], false);
    assert!((json["similarity"].as_f64().unwrap() - 0.95).abs() < 1e-12);
    assert_eq!(json["interpretation"], "IDENTICAL");
}

#[test]
fn compare_reports_duration_check_and_consensus() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("reference.wav");
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 22_050,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&wav, spec).unwrap();
    for _ in 0..220_500 {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();

    let output = cli()
        .args([
            "compare",
            "--a",
            &fixture_file("clip_reference.json"),
            "--b",
            &fixture_file("clip_contrasting.json"),
            "--fingerprint-a",
            "AQADtEmUaEkSRZEGAAAA",
            "--fingerprint-b",
            "AQADtEmUaEkSRZEGAAAA",
            "--wav-a",
            wav.to_str().unwrap(),
            "--format",
            "json",
        ])
        .output()
        .expect("failed to run similarity_cli compare");
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["fingerprint"]["identical"], true);
    assert_eq!(json["consensus"], "fingerprint_higher");
    assert_eq!(json["fingerprint_false_positive"], true);
    assert_eq!(json["feature_digests"]["identical"], false);
    assert_eq!(json["duration_a"]["accuracy"], 1.0);
    assert!(json["computation_time"]["features"].as_f64().unwrap() >= 0.0);
    assert!(json["computation_time"]["fingerprint"].as_f64().is_some());
    assert!(json.get("duration_b").is_none());
}

#[test]
fn batch_reports_failed_pair_with_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let dump = dir.path().join("batch.json");

    let output = cli()
        .args([
            "batch",
            "--manifest",
            &fixture_file("batch_manifest.json"),
            "--output",
            dump.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run similarity_cli batch");
    assert_eq!(output.status.code(), Some(2));

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    assert!(stdout.contains("reference-vs-mismatched"));
    assert!(stdout.contains("FAILED"));

    let json: Value = serde_json::from_str(&std::fs::read_to_string(&dump).unwrap()).unwrap();
    assert_eq!(json["summary"]["total"], 3);
    assert_eq!(json["summary"]["failed"], 1);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results[0]["id"], "reference-vs-tempo_shift");
    assert_eq!(results[0]["comparison"]["consensus"], "agree");
    assert_eq!(results[2]["status"], "failed");
    assert_eq!(results[2]["error_code"], 2001);
}

#[test]
fn config_file_controls_json_layout() {
    let output = cli()
        .args([
            "--config",
            &fixture_file("config_compact.json"),
            "fingerprint",
            "--a",
            "abcd",
            "--b",
            "bcde",
            "--format",
            "json",
        ])
        .output()
        .expect("failed to run similarity_cli with config");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("stdout UTF-8");
    assert_eq!(stdout.trim().lines().count(), 1);
    assert!(stdout.contains("\"similarity\":0.75"));
}
