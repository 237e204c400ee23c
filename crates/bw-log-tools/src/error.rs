//! Log analysis error types.

use serde::Serialize;
use thiserror::Error;

/// A single input line that failed schema or timestamp validation.
///
/// Never fatal to a run: the pipeline records it and moves on to the next line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("malformed record on line {line_number}: {reason}")]
pub struct MalformedRecord {
    /// 1-based line number in the source.
    pub line_number: usize,
    /// The offending line, verbatim.
    pub raw: String,
    /// Why the line was rejected.
    pub reason: String,
}

impl MalformedRecord {
    pub fn new(line_number: usize, raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            line_number,
            raw: raw.into(),
            reason: reason.into(),
        }
    }
}

/// Errors that can occur during log analysis operations.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("source not found: {0}")]
    NotFound(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("window start out of range: {0}")]
    Window(String),

    #[error("{0}")]
    Other(String),
}

/// Convenience alias for log analysis results.
pub type LogResult<T> = Result<T, LogError>;
