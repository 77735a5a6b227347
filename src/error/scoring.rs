// Scoring error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Scoring error code constants
///
/// Error code range: 2001-2002
pub struct ScoringErrorCodes {}

impl ScoringErrorCodes {
    /// A summary field is malformed or the two summaries cannot be paired
    pub const INVALID_INPUT: i32 = 2001;

    /// A correlation-based feature received a zero-variance vector
    pub const UNDEFINED_CORRELATION: i32 = 2002;
}

/// Log a scoring error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_scoring_error(err: &ScoringError, context: &str) {
    error!(
        "Scoring error in {}: code={}, component=SimilarityScorer, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised by a single comparison
///
/// A scoring error aborts only the comparison that produced it; batch
/// callers record it next to the pair and carry on with the rest.
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringError {
    /// Malformed or non-positive scalar field, or mismatched vector lengths
    InvalidInput { field: String, reason: String },

    /// Zero-variance (or single element) vector fed to a correlation feature
    UndefinedCorrelation { feature: String },
}

impl ScoringError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ScoringError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl ErrorCode for ScoringError {
    fn code(&self) -> i32 {
        match self {
            ScoringError::InvalidInput { .. } => ScoringErrorCodes::INVALID_INPUT,
            ScoringError::UndefinedCorrelation { .. } => ScoringErrorCodes::UNDEFINED_CORRELATION,
        }
    }

    fn message(&self) -> String {
        match self {
            ScoringError::InvalidInput { field, reason } => {
                format!("Invalid input for '{}': {}", field, reason)
            }
            ScoringError::UndefinedCorrelation { feature } => {
                format!(
                    "Correlation for '{}' is undefined: vector has zero variance",
                    feature
                )
            }
        }
    }
}

impl fmt::Display for ScoringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ScoringError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_distinct() {
        let invalid = ScoringError::invalid("tempo", "must be > 0");
        let undefined = ScoringError::UndefinedCorrelation {
            feature: "chroma".to_string(),
        };

        assert_eq!(invalid.code(), 2001);
        assert_eq!(undefined.code(), 2002);
    }

    #[test]
    fn test_display_matches_message() {
        let err = ScoringError::invalid("cepstral_means", "length 13 vs 10");
        assert_eq!(format!("{}", err), err.message());
        assert!(err.message().contains("cepstral_means"));
        assert!(err.message().contains("length 13 vs 10"));
    }
}
