// Audio Similarity - feature-based comparison of audio clips
// Per-feature similarity, aggregate score and label for two feature summaries,
// plus reference-fingerprint comparison and parallel batch scoring

// Module declarations
pub mod analysis;
pub mod audio;
pub mod batch;
pub mod config;
pub mod error;
pub mod manifest;
pub mod testing;

// Re-exports for convenience
pub use analysis::classifier::SimilarityLabel;
pub use analysis::consensus::MethodConsensus;
pub use analysis::features::{FeatureKind, FeatureSummary};
pub use analysis::fingerprint::{compare_fingerprints, FingerprintComparison};
pub use analysis::similarity::{score, string_similarity, FeatureSimilarities, SimilarityReport};
pub use analysis::{compare_clips, compare_clips_timed, ClipComparison, MethodTimings};
pub use batch::{BatchOutcome, BatchReport, BatchScorer, BatchSummary, ScoringJob};
pub use config::AppConfig;
pub use error::{ErrorCode, InputError, ScoringError};
pub use manifest::BatchManifest;
