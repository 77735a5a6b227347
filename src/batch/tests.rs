use super::*;
use crate::error::ScoringErrorCodes;
use crate::testing::{contrasting_summary, sample_summary};

fn scorer(worker_threads: usize) -> BatchScorer {
    BatchScorer::new(&BatchConfig { worker_threads }, ComparisonConfig::default())
}

fn mixed_jobs(count: usize) -> Vec<ScoringJob> {
    let reference = Arc::new(sample_summary());
    let contrasting = Arc::new(contrasting_summary());
    let mut broken = sample_summary();
    broken.cepstral_means.truncate(5);
    let broken = Arc::new(broken);

    (0..count)
        .map(|i| {
            let other = match i % 3 {
                0 => Arc::clone(&reference),
                1 => Arc::clone(&contrasting),
                _ => Arc::clone(&broken),
            };
            ScoringJob::new(format!("pair-{i}"), Arc::clone(&reference), other)
        })
        .collect()
}

#[test]
fn test_outcomes_follow_input_order() {
    let jobs = mixed_jobs(30);
    let outcomes = scorer(4).run(&jobs);

    assert_eq!(outcomes.len(), jobs.len());
    for (job, outcome) in jobs.iter().zip(&outcomes) {
        assert_eq!(job.id, outcome.id);
    }
}

#[test]
fn test_failures_do_not_abort_other_pairs() {
    let outcomes = scorer(3).run(&mixed_jobs(9));

    for (i, outcome) in outcomes.iter().enumerate() {
        match i % 3 {
            0 => assert_eq!(
                outcome.result.as_ref().unwrap().label(),
                SimilarityLabel::Identical
            ),
            1 => assert!(outcome.result.is_ok()),
            _ => assert_eq!(
                outcome.result.as_ref().unwrap_err().code(),
                ScoringErrorCodes::INVALID_INPUT
            ),
        }
    }
}

#[test]
fn test_parallel_matches_sequential() {
    let jobs = mixed_jobs(12);
    let sequential = scorer(1).run(&jobs);
    let parallel = scorer(8).run(&jobs);
    assert_eq!(sequential, parallel);
}

#[test]
fn test_zero_workers_uses_available_cpus() {
    let scorer = scorer(0);
    assert!(scorer.workers() >= 1);
    assert_eq!(scorer.run(&mixed_jobs(4)).len(), 4);
}

#[test]
fn test_empty_batch() {
    assert!(scorer(4).run(&[]).is_empty());
    let summary = BatchSummary::from_outcomes(&[]);
    assert_eq!(summary.total, 0);
    assert!(summary.labels.is_empty());
}

#[test]
fn test_summary_counts_and_labels() {
    let outcomes = scorer(2).run(&mixed_jobs(6));
    let summary = BatchSummary::from_outcomes(&outcomes);

    assert_eq!(summary.total, 6);
    assert_eq!(summary.succeeded, 4);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.labels.get(&SimilarityLabel::Identical), Some(&2));
    assert_eq!(summary.labels.values().sum::<usize>(), 4);
}

#[test]
fn test_report_records_errors() {
    let outcomes = scorer(2).run(&mixed_jobs(3));
    let report = BatchReport::new(&outcomes);

    assert_eq!(report.results[0].status, BatchStatus::Ok);
    assert!(report.results[0].comparison.is_some());

    let failed = &report.results[2];
    assert_eq!(failed.status, BatchStatus::Failed);
    assert_eq!(failed.error_code, Some(ScoringErrorCodes::INVALID_INPUT));
    assert!(failed.error.as_deref().unwrap().contains("cepstral_means"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["results"][2]["status"], "failed");
    assert!(json["results"][2].get("comparison").is_none());
    assert_eq!(json["summary"]["labels"]["IDENTICAL"], 1);
}
