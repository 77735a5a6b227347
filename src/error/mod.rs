// Error types for the audio similarity crate
//
// This module defines the error types for scoring and input loading,
// providing structured error handling with numeric error codes that the CLI
// and batch reports can surface without string matching.

mod input;
mod scoring;

pub use input::{log_input_error, InputError, InputErrorCodes};
pub use scoring::{log_scoring_error, ScoringError, ScoringErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// library, batch and CLI boundaries.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
