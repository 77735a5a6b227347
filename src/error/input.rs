// Input error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Input error code constants
///
/// Error code range: 3001-3004
pub struct InputErrorCodes {}

impl InputErrorCodes {
    /// File could not be read
    pub const IO: i32 = 3001;

    /// File contents are not valid JSON for the expected document
    pub const PARSE: i32 = 3002;

    /// Document parsed but violates a structural rule
    pub const INVALID: i32 = 3003;

    /// Audio file header could not be understood
    pub const UNSUPPORTED_AUDIO: i32 = 3004;
}

/// Log an input error with structured context
pub fn log_input_error(err: &InputError, context: &str) {
    error!(
        "Input error in {}: code={}, component=InputLoader, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised while loading summaries, manifests and audio headers
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// File could not be read
    Io { path: String, reason: String },

    /// JSON could not be parsed
    Parse { source: String, reason: String },

    /// Structural rule violated
    Invalid { reason: String },

    /// WAV header rejected
    UnsupportedAudio { path: String, reason: String },
}

impl ErrorCode for InputError {
    fn code(&self) -> i32 {
        match self {
            InputError::Io { .. } => InputErrorCodes::IO,
            InputError::Parse { .. } => InputErrorCodes::PARSE,
            InputError::Invalid { .. } => InputErrorCodes::INVALID,
            InputError::UnsupportedAudio { .. } => InputErrorCodes::UNSUPPORTED_AUDIO,
        }
    }

    fn message(&self) -> String {
        match self {
            InputError::Io { path, reason } => format!("Failed to read {}: {}", path, reason),
            InputError::Parse { source, reason } => {
                format!("Failed to parse {}: {}", source, reason)
            }
            InputError::Invalid { reason } => format!("Invalid document: {}", reason),
            InputError::UnsupportedAudio { path, reason } => {
                format!("Unsupported audio file {}: {}", path, reason)
            }
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for InputError {}
