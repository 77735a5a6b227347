// Fingerprint module - comparison of reference fingerprint strings
//
// Fingerprints come from an external fingerprinting tool or from
// FeatureSummary::digest(). Only the strings are compared here.

use serde::{Deserialize, Serialize};

use crate::analysis::classifier::SimilarityLabel;
use crate::analysis::similarity::string_similarity;

/// Result of comparing two fingerprint strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FingerprintComparison {
    /// Longest-matching-block ratio in [0, 1]
    pub similarity: f64,
    /// Exact string equality
    pub identical: bool,
    /// Length of the first fingerprint in chars
    pub length_a: usize,
    /// Length of the second fingerprint in chars
    pub length_b: usize,
    /// Label bucket for `similarity`
    pub interpretation: SimilarityLabel,
}

/// Compare two fingerprint strings
pub fn compare_fingerprints(a: &str, b: &str) -> FingerprintComparison {
    let similarity = string_similarity(a, b);

    FingerprintComparison {
        similarity,
        identical: a == b,
        length_a: a.chars().count(),
        length_b: b.chars().count(),
        interpretation: SimilarityLabel::classify(similarity),
    }
}
