//! Error types for rainbow highlighting.

use std::io;
use thiserror::Error;

/// Result type alias for highlighting operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for highlighting operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from thread spawning or terminal output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// An option is outside its accepted domain.
    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfiguration {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
    /// A colorization job panicked. Carries the lowest failing row index.
    #[error("colorizing row {row} failed: {message}")]
    WorkerFailure { row: usize, message: String },
    /// The worker pool stopped accepting or running jobs mid-batch.
    #[error("worker pool disconnected before the batch completed")]
    PoolDisconnected,
}

impl Error {
    pub(crate) fn invalid(field: &'static str, value: impl ToString, reason: &'static str) -> Self {
        Self::InvalidConfiguration {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

/// Failure reported by a [`ProgressReporter`](crate::progress::ProgressReporter).
///
/// Progress is best-effort: the highlighter logs these and keeps going.
#[derive(Debug, Error)]
#[error("progress update failed: {0}")]
pub struct ProgressError(pub String);

impl From<io::Error> for ProgressError {
    fn from(e: io::Error) -> Self {
        Self(e.to_string())
    }
}
