//! Error types for u-timetable.
//!
//! Only input that cannot be scheduled at all is an error. Courses that end
//! up with too few sessions are reported inside the result, not here.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors that abort a whole allocation request.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The request decoded but failed integrity checks.
    #[error("invalid schedule request: {}", join_errors(.0))]
    InvalidRequest(Vec<ValidationError>),

    /// The request payload could not be decoded.
    #[error("malformed request payload: {0}")]
    MalformedPayload(#[source] serde_json::Error),

    /// The result could not be encoded.
    #[error("failed to encode schedule result: {0}")]
    Encode(#[source] serde_json::Error),

    /// The allocator configuration is unusable.
    #[error("invalid allocator config: {0}")]
    InvalidConfig(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type alias for u-timetable operations.
pub type Result<T> = std::result::Result<T, ScheduleError>;
