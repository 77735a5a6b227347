// Kind module - the nine scored features and how each is compared

use serde::{Deserialize, Serialize};

use super::types::FeatureSummary;

/// How a feature's two values are turned into a similarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimilarityRule {
    /// `max(0, 1 - |a - b| / max(a, b))`, 1.0 when both are zero
    ScalarCloseness,
    /// `max(0, 1 - |a - b|)` for values already bounded near [0, 1]
    RatioDifference,
    /// Pearson correlation of the paired per-coefficient means
    Correlation,
}

/// A feature that contributes to the aggregate similarity
///
/// `FeatureKind::ALL` fixes the order used for reporting and for the
/// aggregate mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Duration,
    Energy,
    SpectralCentroid,
    SpectralRolloff,
    Mfcc,
    Chroma,
    Tempo,
    HarmonicRatio,
    PercussiveRatio,
}

/// A feature's value borrowed from a summary
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Scalar(f64),
    Vector(&'a [f64]),
}

impl FeatureKind {
    /// All scored features in reporting order
    pub const ALL: [FeatureKind; 9] = [
        FeatureKind::Duration,
        FeatureKind::Energy,
        FeatureKind::SpectralCentroid,
        FeatureKind::SpectralRolloff,
        FeatureKind::Mfcc,
        FeatureKind::Chroma,
        FeatureKind::Tempo,
        FeatureKind::HarmonicRatio,
        FeatureKind::PercussiveRatio,
    ];

    /// Stable snake_case name used in reports
    pub fn name(self) -> &'static str {
        match self {
            FeatureKind::Duration => "duration",
            FeatureKind::Energy => "energy",
            FeatureKind::SpectralCentroid => "spectral_centroid",
            FeatureKind::SpectralRolloff => "spectral_rolloff",
            FeatureKind::Mfcc => "mfcc",
            FeatureKind::Chroma => "chroma",
            FeatureKind::Tempo => "tempo",
            FeatureKind::HarmonicRatio => "harmonic_ratio",
            FeatureKind::PercussiveRatio => "percussive_ratio",
        }
    }

    /// Comparison rule applied to this feature
    pub fn rule(self) -> SimilarityRule {
        match self {
            FeatureKind::Duration
            | FeatureKind::Energy
            | FeatureKind::SpectralCentroid
            | FeatureKind::SpectralRolloff
            | FeatureKind::Tempo => SimilarityRule::ScalarCloseness,
            FeatureKind::HarmonicRatio | FeatureKind::PercussiveRatio => {
                SimilarityRule::RatioDifference
            }
            FeatureKind::Mfcc | FeatureKind::Chroma => SimilarityRule::Correlation,
        }
    }

    /// Read this feature's value out of a summary
    pub fn value_of(self, summary: &FeatureSummary) -> FeatureValue<'_> {
        match self {
            FeatureKind::Duration => FeatureValue::Scalar(summary.duration),
            FeatureKind::Energy => FeatureValue::Scalar(summary.rms_energy),
            FeatureKind::SpectralCentroid => {
                FeatureValue::Scalar(summary.spectral_centroid_mean)
            }
            FeatureKind::SpectralRolloff => FeatureValue::Scalar(summary.spectral_rolloff_mean),
            FeatureKind::Mfcc => FeatureValue::Vector(&summary.cepstral_means),
            FeatureKind::Chroma => FeatureValue::Vector(&summary.chroma_means),
            FeatureKind::Tempo => FeatureValue::Scalar(summary.tempo),
            FeatureKind::HarmonicRatio => FeatureValue::Scalar(summary.harmonic_ratio),
            FeatureKind::PercussiveRatio => FeatureValue::Scalar(summary.percussive_ratio),
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
