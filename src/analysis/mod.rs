// Analysis module - clip comparison pipeline
//
// Module organization:
// - features: FeatureSummary input record, FeatureKind, content digest
// - similarity: per-feature scorer and string-fingerprint matcher
// - classifier: label table for aggregate scores
// - fingerprint: comparison of reference fingerprint strings
// - consensus: agreement between the two comparison methods
//
// compare_clips() combines them: feature scoring always runs, fingerprint
// comparison and consensus only when both fingerprints are supplied.

use std::time::Instant;

use serde::{Deserialize, Serialize};

pub mod classifier;
pub mod consensus;
pub mod features;
pub mod fingerprint;
pub mod similarity;

use classifier::{SimilarityLabel, VERY_SIMILAR_THRESHOLD};
use consensus::MethodConsensus;
use features::FeatureSummary;
use fingerprint::{compare_fingerprints, FingerprintComparison};
use similarity::{score, string_similarity, SimilarityReport};

use crate::config::ComparisonConfig;
use crate::error::ScoringError;

/// Content digests of both summaries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestComparison {
    pub a: String,
    pub b: String,
    /// Both summaries hold exactly the same values
    pub identical: bool,
    /// String similarity of the two digests
    pub similarity: f64,
}

impl DigestComparison {
    fn new(a: &FeatureSummary, b: &FeatureSummary) -> Self {
        let a = a.digest();
        let b = b.digest();
        let similarity = string_similarity(&a, &b);
        Self {
            identical: a == b,
            similarity,
            a,
            b,
        }
    }
}

/// Full comparison of two clips
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipComparison {
    /// Feature-based similarity report
    pub features: SimilarityReport,
    pub feature_digests: DigestComparison,
    /// Present when both reference fingerprints were supplied
    pub fingerprint: Option<FingerprintComparison>,
    /// Present together with `fingerprint`
    pub consensus: Option<MethodConsensus>,
    /// Fingerprints are identical but the features say the clips are not
    /// even very similar
    pub fingerprint_false_positive: bool,
}

impl ClipComparison {
    /// Label of the feature-based aggregate
    pub fn label(&self) -> SimilarityLabel {
        self.features.interpretation
    }
}

/// Wall-clock time spent in each comparison method, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodTimings {
    /// Feature scoring plus digests
    pub features: f64,
    /// Fingerprint comparison, when fingerprints were supplied
    pub fingerprint: Option<f64>,
}

/// Compare two clips by features and, optionally, by reference fingerprints
///
/// # Errors
/// Propagates scoring errors; fingerprint comparison cannot fail.
pub fn compare_clips(
    a: &FeatureSummary,
    b: &FeatureSummary,
    fingerprints: Option<(&str, &str)>,
    config: &ComparisonConfig,
) -> Result<ClipComparison, ScoringError> {
    compare_clips_timed(a, b, fingerprints, config).map(|(comparison, _)| comparison)
}

/// Same as [`compare_clips`], also reporting how long each method took
///
/// Timings live outside `ClipComparison` so comparisons of the same inputs
/// stay equal.
pub fn compare_clips_timed(
    a: &FeatureSummary,
    b: &FeatureSummary,
    fingerprints: Option<(&str, &str)>,
    config: &ComparisonConfig,
) -> Result<(ClipComparison, MethodTimings), ScoringError> {
    let started = Instant::now();
    let features = score(a, b)?;
    let feature_digests = DigestComparison::new(a, b);
    let feature_seconds = started.elapsed().as_secs_f64();

    let started = Instant::now();
    let fingerprint = fingerprints.map(|(fa, fb)| compare_fingerprints(fa, fb));
    let fingerprint_seconds = fingerprint
        .as_ref()
        .map(|_| started.elapsed().as_secs_f64());
    let consensus = fingerprint.as_ref().map(|fp| {
        MethodConsensus::assess(
            features.aggregate_similarity,
            fp.similarity,
            config.consensus_tolerance,
        )
    });

    let fingerprint_false_positive = fingerprint
        .as_ref()
        .is_some_and(|fp| fp.identical && features.aggregate_similarity < VERY_SIMILAR_THRESHOLD);

    if fingerprint_false_positive {
        log::warn!(
            "Identical fingerprints but feature aggregate is {:.3}",
            features.aggregate_similarity
        );
    }

    let comparison = ClipComparison {
        features,
        feature_digests,
        fingerprint,
        consensus,
        fingerprint_false_positive,
    };
    let timings = MethodTimings {
        features: feature_seconds,
        fingerprint: fingerprint_seconds,
    };
    Ok((comparison, timings))
}
