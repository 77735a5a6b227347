// Similarity - per-feature and aggregate similarity of two clips
//
// Module organization:
// - scalar: relative closeness and ratio difference of two measurements
// - correlation: Pearson correlation of coefficient-mean vectors
// - sequence: longest-matching-block ratio of fingerprint strings
// - mod.rs: scorer (score) and its report
//
// Scoring is pure: no I/O, no shared state, same inputs give the same report.

mod correlation;
mod scalar;
mod sequence;

pub use correlation::{correlation_similarity, pearson};
pub use scalar::{ratio_difference, scalar_closeness};
pub use sequence::{string_similarity, MatchingBlock, SequenceMatcher};

use serde::{Deserialize, Serialize};

use crate::analysis::classifier::SimilarityLabel;
use crate::analysis::features::{FeatureKind, FeatureSummary, FeatureValue, SimilarityRule};
use crate::error::ScoringError;

/// Similarity per scored feature, each in [0, 1]
///
/// Serializes as a map in `FeatureKind::ALL` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureSimilarities {
    pub duration: f64,
    pub energy: f64,
    pub spectral_centroid: f64,
    pub spectral_rolloff: f64,
    pub mfcc: f64,
    pub chroma: f64,
    pub tempo: f64,
    pub harmonic_ratio: f64,
    pub percussive_ratio: f64,
}

impl FeatureSimilarities {
    /// Similarity of a single feature
    pub fn get(&self, kind: FeatureKind) -> f64 {
        match kind {
            FeatureKind::Duration => self.duration,
            FeatureKind::Energy => self.energy,
            FeatureKind::SpectralCentroid => self.spectral_centroid,
            FeatureKind::SpectralRolloff => self.spectral_rolloff,
            FeatureKind::Mfcc => self.mfcc,
            FeatureKind::Chroma => self.chroma,
            FeatureKind::Tempo => self.tempo,
            FeatureKind::HarmonicRatio => self.harmonic_ratio,
            FeatureKind::PercussiveRatio => self.percussive_ratio,
        }
    }

    /// (feature, similarity) pairs in reporting order
    pub fn iter(&self) -> impl Iterator<Item = (FeatureKind, f64)> + '_ {
        FeatureKind::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }

    /// Unweighted arithmetic mean of the nine values
    pub fn mean(&self) -> f64 {
        self.iter().map(|(_, value)| value).sum::<f64>() / FeatureKind::ALL.len() as f64
    }

    fn from_values(values: [f64; 9]) -> Self {
        let [
            duration,
            energy,
            spectral_centroid,
            spectral_rolloff,
            mfcc,
            chroma,
            tempo,
            harmonic_ratio,
            percussive_ratio,
        ] = values;
        Self {
            duration,
            energy,
            spectral_centroid,
            spectral_rolloff,
            mfcc,
            chroma,
            tempo,
            harmonic_ratio,
            percussive_ratio,
        }
    }
}

/// Result of comparing two feature summaries
///
/// Created fresh per comparison and owned by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarityReport {
    /// Per-feature similarity values
    pub similarities: FeatureSimilarities,
    /// Mean of the per-feature values
    pub aggregate_similarity: f64,
    /// Label bucket for the aggregate
    pub interpretation: SimilarityLabel,
}

/// Compare two feature summaries
///
/// # Errors
/// * `InvalidInput` if either summary is malformed or a vector field's
///   length differs between the two
/// * `UndefinedCorrelation` if a cepstral or chroma vector is constant
pub fn score(a: &FeatureSummary, b: &FeatureSummary) -> Result<SimilarityReport, ScoringError> {
    a.validate_pair(b)?;

    let mut values = [0.0; 9];
    for (slot, kind) in values.iter_mut().zip(FeatureKind::ALL) {
        *slot = feature_similarity(kind, a, b)?;
    }

    let similarities = FeatureSimilarities::from_values(values);
    let aggregate_similarity = similarities.mean();
    let interpretation = SimilarityLabel::classify(aggregate_similarity);

    log::debug!(
        "Scored pair: aggregate={:.4}, interpretation={:?}",
        aggregate_similarity,
        interpretation
    );

    Ok(SimilarityReport {
        similarities,
        aggregate_similarity,
        interpretation,
    })
}

fn feature_similarity(
    kind: FeatureKind,
    a: &FeatureSummary,
    b: &FeatureSummary,
) -> Result<f64, ScoringError> {
    match (kind.rule(), kind.value_of(a), kind.value_of(b)) {
        (SimilarityRule::ScalarCloseness, FeatureValue::Scalar(x), FeatureValue::Scalar(y)) => {
            Ok(scalar_closeness(x, y))
        }
        (SimilarityRule::RatioDifference, FeatureValue::Scalar(x), FeatureValue::Scalar(y)) => {
            Ok(ratio_difference(x, y))
        }
        (SimilarityRule::Correlation, FeatureValue::Vector(x), FeatureValue::Vector(y)) => {
            correlation_similarity(kind, x, y)
        }
        _ => Err(ScoringError::invalid(
            kind.name(),
            "feature value does not fit its comparison rule",
        )),
    }
}

#[cfg(test)]
#[path = "similarity_tests.rs"]
mod tests;
