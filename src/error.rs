//! Crate-level error type.
//!
//! Infeasibility is never an error: unplaceable courses are reported inside
//! the [`Timetable`](crate::models::Timetable). Errors are reserved for
//! malformed input, store failures and configuration problems.

use thiserror::Error;

use crate::store::StoreError;
use crate::validation::ValidationError;

/// Errors returned by the scheduler and its collaborators.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Input failed validation. Carries every detected problem.
    #[error("Invalid scheduling input ({} error(s)): {}", .0.len(), summarize(.0))]
    Validation(Vec<ValidationError>),

    /// The domain store could not produce a snapshot.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Solver configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SchedulerError {
    /// Validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            SchedulerError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<Vec<ValidationError>> for SchedulerError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SchedulerError::Validation(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
