// Audio module - source file inspection
//
// Only WAV headers are read; samples are never decoded here.

pub mod probe;

// Re-export commonly used types for convenience
pub use probe::{probe_wav, ClipInfo, DurationCheck};
