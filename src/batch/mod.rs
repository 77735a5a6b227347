// Batch module - parallel scoring of many clip pairs
//
// Every pair is independent: workers pull the next job index from a shared
// atomic cursor, score it, and send (index, outcome) back over a channel.
// Results are reordered by index, so output order always matches input
// order regardless of which worker finished first. A failing pair records
// its error and never stops the others.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use serde::{Deserialize, Serialize};

use crate::analysis::classifier::SimilarityLabel;
use crate::analysis::features::FeatureSummary;
use crate::analysis::{compare_clips, ClipComparison};
use crate::config::{BatchConfig, ComparisonConfig};
use crate::error::{ErrorCode, ScoringError};

/// One pair to compare
#[derive(Debug, Clone)]
pub struct ScoringJob {
    pub id: String,
    pub a_id: String,
    pub b_id: String,
    pub a: Arc<FeatureSummary>,
    pub b: Arc<FeatureSummary>,
    /// Reference fingerprints, when both clips have one
    pub fingerprints: Option<(String, String)>,
}

impl ScoringJob {
    /// Job comparing two summaries on features only
    pub fn new(id: impl Into<String>, a: Arc<FeatureSummary>, b: Arc<FeatureSummary>) -> Self {
        let id = id.into();
        Self {
            a_id: format!("{id}.a"),
            b_id: format!("{id}.b"),
            id,
            a,
            b,
            fingerprints: None,
        }
    }
}

/// Result of one job
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub id: String,
    pub a: String,
    pub b: String,
    pub result: Result<ClipComparison, ScoringError>,
}

impl BatchOutcome {
    /// Serializable form of the outcome
    pub fn record(&self) -> BatchRecord {
        match &self.result {
            Ok(comparison) => BatchRecord {
                id: self.id.clone(),
                a: self.a.clone(),
                b: self.b.clone(),
                status: BatchStatus::Ok,
                comparison: Some(comparison.clone()),
                error_code: None,
                error: None,
            },
            Err(err) => BatchRecord {
                id: self.id.clone(),
                a: self.a.clone(),
                b: self.b.clone(),
                status: BatchStatus::Failed,
                comparison: None,
                error_code: Some(err.code()),
                error: Some(err.message()),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Ok,
    Failed,
}

/// One line of a batch result dump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub id: String,
    pub a: String,
    pub b: String,
    pub status: BatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ClipComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Counts over a finished batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Successful pairs per label
    pub labels: BTreeMap<SimilarityLabel, usize>,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[BatchOutcome]) -> Self {
        let mut summary = Self {
            total: outcomes.len(),
            ..Self::default()
        };
        for outcome in outcomes {
            match &outcome.result {
                Ok(comparison) => {
                    summary.succeeded += 1;
                    *summary.labels.entry(comparison.label()).or_insert(0) += 1;
                }
                Err(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// Complete batch result: counts plus one record per pair in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub summary: BatchSummary,
    pub results: Vec<BatchRecord>,
}

impl BatchReport {
    pub fn new(outcomes: &[BatchOutcome]) -> Self {
        Self {
            summary: BatchSummary::from_outcomes(outcomes),
            results: outcomes.iter().map(BatchOutcome::record).collect(),
        }
    }
}

/// Fixed-size worker pool for scoring jobs
#[derive(Debug, Clone)]
pub struct BatchScorer {
    workers: usize,
    comparison: ComparisonConfig,
}

impl BatchScorer {
    pub fn new(batch: &BatchConfig, comparison: ComparisonConfig) -> Self {
        Self {
            workers: batch.resolved_workers(),
            comparison,
        }
    }

    /// Number of worker threads used per run
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Score every job; outcomes come back in input order
    pub fn run(&self, jobs: &[ScoringJob]) -> Vec<BatchOutcome> {
        if jobs.is_empty() {
            return Vec::new();
        }

        let workers = self.workers.clamp(1, jobs.len());
        log::info!("Scoring {} pairs on {} workers", jobs.len(), workers);

        let cursor = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel();

        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let cursor = &cursor;
                scope.spawn(move || loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(job) = jobs.get(index) else {
                        break;
                    };
                    if tx.send((index, self.score_job(job))).is_err() {
                        break;
                    }
                });
            }
        });
        drop(tx);

        let mut slots: Vec<Option<BatchOutcome>> = jobs.iter().map(|_| None).collect();
        for (index, outcome) in rx {
            slots[index] = Some(outcome);
        }

        let outcomes: Vec<BatchOutcome> = slots.into_iter().flatten().collect();
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        log::info!(
            "Batch finished: {} succeeded, {} failed",
            outcomes.len() - failed,
            failed
        );
        outcomes
    }

    fn score_job(&self, job: &ScoringJob) -> BatchOutcome {
        let fingerprints = job
            .fingerprints
            .as_ref()
            .map(|(fa, fb)| (fa.as_str(), fb.as_str()));
        let result = compare_clips(&job.a, &job.b, fingerprints, &self.comparison);

        match &result {
            Ok(comparison) => log::debug!(
                "Pair {}: aggregate={:.4} ({})",
                job.id,
                comparison.features.aggregate_similarity,
                comparison.label()
            ),
            Err(err) => log::warn!(
                "Pair {} failed: code={}, message={}",
                job.id,
                err.code(),
                err.message()
            ),
        }

        BatchOutcome {
            id: job.id.clone(),
            a: job.a_id.clone(),
            b: job.b_id.clone(),
            result,
        }
    }
}

#[cfg(test)]
mod tests;
