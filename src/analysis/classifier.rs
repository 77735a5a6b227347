// Classifier - threshold-based interpretation of an aggregate similarity
//
// This module maps an aggregate similarity in [0, 1] onto one of six
// human-readable buckets. A single canonical table is used everywhere:
//
// | Range          | Label            |
// |----------------|------------------|
// | >= 0.95        | IDENTICAL        |
// | [0.80, 0.95)   | VERY_SIMILAR     |
// | [0.60, 0.80)   | SIMILAR          |
// | [0.40, 0.60)   | SOMEWHAT_SIMILAR |
// | [0.20, 0.40)   | SLIGHTLY_SIMILAR |
// | < 0.20         | DIFFERENT        |
//
// Scores are clamped into [0, 1] before lookup; NaN falls through to DIFFERENT.

use serde::{Deserialize, Serialize};

/// Lower bound of the IDENTICAL bucket
pub const IDENTICAL_THRESHOLD: f64 = 0.95;
/// Lower bound of the VERY_SIMILAR bucket
pub const VERY_SIMILAR_THRESHOLD: f64 = 0.80;
/// Lower bound of the SIMILAR bucket
pub const SIMILAR_THRESHOLD: f64 = 0.60;
/// Lower bound of the SOMEWHAT_SIMILAR bucket
pub const SOMEWHAT_SIMILAR_THRESHOLD: f64 = 0.40;
/// Lower bound of the SLIGHTLY_SIMILAR bucket
pub const SLIGHTLY_SIMILAR_THRESHOLD: f64 = 0.20;

/// Interpretation bucket for a similarity score
///
/// Variants are ordered from least to most similar.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SimilarityLabel {
    /// Unrelated audio content
    Different,
    /// Minimal common features
    SlightlySimilar,
    /// Some common characteristics
    SomewhatSimilar,
    /// Related audio content
    Similar,
    /// Likely same content with minor differences
    VerySimilar,
    /// Same audio
    Identical,
}

impl SimilarityLabel {
    /// All labels from least to most similar
    pub const ALL: [SimilarityLabel; 6] = [
        SimilarityLabel::Different,
        SimilarityLabel::SlightlySimilar,
        SimilarityLabel::SomewhatSimilar,
        SimilarityLabel::Similar,
        SimilarityLabel::VerySimilar,
        SimilarityLabel::Identical,
    ];

    /// Classify a similarity score
    ///
    /// Decision table (after clamping into [0, 1]):
    /// 1. IF score >= 0.95 THEN Identical
    /// 2. ELSE IF score >= 0.80 THEN VerySimilar
    /// 3. ELSE IF score >= 0.60 THEN Similar
    /// 4. ELSE IF score >= 0.40 THEN SomewhatSimilar
    /// 5. ELSE IF score >= 0.20 THEN SlightlySimilar
    /// 6. ELSE Different
    pub fn classify(score: f64) -> Self {
        let score = score.clamp(0.0, 1.0);

        if score >= IDENTICAL_THRESHOLD {
            SimilarityLabel::Identical
        } else if score >= VERY_SIMILAR_THRESHOLD {
            SimilarityLabel::VerySimilar
        } else if score >= SIMILAR_THRESHOLD {
            SimilarityLabel::Similar
        } else if score >= SOMEWHAT_SIMILAR_THRESHOLD {
            SimilarityLabel::SomewhatSimilar
        } else if score >= SLIGHTLY_SIMILAR_THRESHOLD {
            SimilarityLabel::SlightlySimilar
        } else {
            SimilarityLabel::Different
        }
    }

    /// Canonical label text, e.g. "VERY_SIMILAR"
    pub fn as_str(self) -> &'static str {
        match self {
            SimilarityLabel::Identical => "IDENTICAL",
            SimilarityLabel::VerySimilar => "VERY_SIMILAR",
            SimilarityLabel::Similar => "SIMILAR",
            SimilarityLabel::SomewhatSimilar => "SOMEWHAT_SIMILAR",
            SimilarityLabel::SlightlySimilar => "SLIGHTLY_SIMILAR",
            SimilarityLabel::Different => "DIFFERENT",
        }
    }

    /// Longer human-readable explanation of the bucket
    pub fn description(self) -> &'static str {
        match self {
            SimilarityLabel::Identical => "Same audio file",
            SimilarityLabel::VerySimilar => "Likely same content with minor differences",
            SimilarityLabel::Similar => "Related audio content",
            SimilarityLabel::SomewhatSimilar => "Some common characteristics",
            SimilarityLabel::SlightlySimilar => "Minimal common features",
            SimilarityLabel::Different => "Unrelated audio content",
        }
    }
}

impl std::fmt::Display for SimilarityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
