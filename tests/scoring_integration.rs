// Integration tests for the scoring pipeline
//
// Exercises the public API end to end on the JSON fixtures: summary loading,
// pairwise scoring, clip comparison and manifest-driven batch scoring.

use std::path::PathBuf;

use audio_similarity::batch::BatchStatus;
use audio_similarity::config::{AppConfig, BatchConfig, ComparisonConfig};
use audio_similarity::error::{ErrorCode, InputErrorCodes, ScoringErrorCodes};
use audio_similarity::{
    compare_clips, score, string_similarity, BatchManifest, BatchReport, BatchScorer,
    FeatureKind, FeatureSummary, MethodConsensus, SimilarityLabel,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

fn load(name: &str) -> FeatureSummary {
    FeatureSummary::load(fixture(name)).unwrap()
}

#[test]
fn test_alias_keys_load_the_same_vectors() {
    let reference = load("clip_reference.json");
    let shifted = load("clip_tempo_shift.json");

    assert_eq!(reference.cepstral_means, shifted.cepstral_means);
    assert_eq!(reference.chroma_means, shifted.chroma_means);
    assert_eq!(shifted.tempo, 130.0);
}

#[test]
fn test_tempo_shift_only_moves_tempo() {
    let report = score(&load("clip_reference.json"), &load("clip_tempo_shift.json")).unwrap();

    for (kind, value) in report.similarities.iter() {
        if kind == FeatureKind::Tempo {
            assert!((value - 0.923).abs() < 1e-3);
        } else {
            assert!((value - 1.0).abs() < 1e-12, "{kind} = {value}");
        }
    }
    assert_eq!(report.interpretation, SimilarityLabel::Identical);
}

#[test]
fn test_scoring_is_symmetric_on_fixtures() {
    let a = load("clip_reference.json");
    let b = load("clip_contrasting.json");

    assert_eq!(score(&a, &b).unwrap(), score(&b, &a).unwrap());
}

#[test]
fn test_mismatched_fixture_fails_scoring() {
    let err = score(&load("clip_reference.json"), &load("clip_mismatched.json")).unwrap_err();
    assert_eq!(err.code(), ScoringErrorCodes::INVALID_INPUT);
    assert!(err.message().contains("10"));
}

#[test]
fn test_missing_summary_file() {
    let err = FeatureSummary::load(fixture("no_such_clip.json")).unwrap_err();
    assert_eq!(err.code(), InputErrorCodes::IO);
}

#[test]
fn test_digests_separate_distinct_summaries() {
    let reference = load("clip_reference.json");
    let shifted = load("clip_tempo_shift.json");

    assert_eq!(reference.digest(), load("clip_reference.json").digest());
    assert_ne!(reference.digest(), shifted.digest());
    assert!(string_similarity(&reference.digest(), &shifted.digest()) < 1.0);
}

#[test]
fn test_compare_clips_with_fingerprints() {
    let comparison = compare_clips(
        &load("clip_reference.json"),
        &load("clip_tempo_shift.json"),
        Some(("AQADtEmUaEkSRZEGAAAA", "AQADtEmUaEkSRZEGAAAB")),
        &ComparisonConfig::default(),
    )
    .unwrap();

    assert_eq!(comparison.consensus, Some(MethodConsensus::Agree));
    assert!(!comparison.fingerprint_false_positive);
    assert!(!comparison.feature_digests.identical);
}

#[test]
fn test_batch_from_manifest() {
    let manifest = BatchManifest::load(fixture("batch_manifest.json")).unwrap();
    let jobs = manifest.into_jobs().unwrap();
    assert_eq!(jobs.len(), 3);
    assert!(jobs[0].fingerprints.is_some());
    assert!(jobs[1].fingerprints.is_none());

    let config = AppConfig::load_from_file(fixture("config_compact.json"));
    assert_eq!(config.batch, BatchConfig { worker_threads: 2 });

    let scorer = BatchScorer::new(&config.batch, config.comparison.clone());
    let report = BatchReport::new(&scorer.run(&jobs));

    assert_eq!(report.summary.succeeded, 2);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(
        report.summary.labels.get(&SimilarityLabel::Identical),
        Some(&1)
    );

    let statuses: Vec<BatchStatus> = report.results.iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![BatchStatus::Ok, BatchStatus::Ok, BatchStatus::Failed]
    );
    assert_eq!(report.results[2].a, "reference");
    assert_eq!(report.results[2].b, "mismatched");
}
