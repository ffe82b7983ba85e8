//! Error types for qasrl-core.

use thiserror::Error;

/// Result type for qasrl-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for qasrl-core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// A span whose start is not strictly before its end.
    #[error("Malformed span: start {start} must be < end {end}")]
    MalformedSpan {
        /// Offending start offset
        start: usize,
        /// Offending end offset
        end: usize,
    },
}

impl Error {
    /// Create a malformed span error.
    #[must_use]
    pub fn malformed_span(start: usize, end: usize) -> Self {
        Self::MalformedSpan { start, end }
    }
}
