// Consensus - agreement between feature-based and fingerprint-based scores

use serde::{Deserialize, Serialize};

/// Default maximum gap for the two methods to count as agreeing
pub const DEFAULT_CONSENSUS_TOLERANCE: f64 = 0.1;

/// How the feature score and the fingerprint score relate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodConsensus {
    /// Scores differ by less than the tolerance
    Agree,
    /// Feature comparison rates the pair higher
    FeatureHigher,
    /// Fingerprint comparison rates the pair higher
    FingerprintHigher,
}

impl MethodConsensus {
    /// Compare the two scores
    ///
    /// `Agree` when `|feature_score - fingerprint_score| < tolerance`.
    pub fn assess(feature_score: f64, fingerprint_score: f64, tolerance: f64) -> Self {
        if (feature_score - fingerprint_score).abs() < tolerance {
            MethodConsensus::Agree
        } else if feature_score > fingerprint_score {
            MethodConsensus::FeatureHigher
        } else {
            MethodConsensus::FingerprintHigher
        }
    }
}
