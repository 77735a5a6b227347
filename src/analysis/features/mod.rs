// Features - clip-level feature summaries consumed by the scorer
//
// Module organization:
// - types: FeatureSummary record, JSON loading and validation
// - kind: FeatureKind (the nine scored features) and their comparison rules
// - digest: content hash of a summary
//
// Computing the summaries (decoding, cepstral/spectral/chroma transforms,
// beat tracking, harmonic/percussive separation) belongs to the external
// extractor; this crate only reads its output.

mod digest;
mod kind;
mod types;

pub use kind::{FeatureKind, FeatureValue, SimilarityRule};
pub use types::FeatureSummary;
