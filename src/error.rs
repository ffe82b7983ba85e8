//! Error types for qasrl-eval.

use thiserror::Error;

/// Result type for qasrl-eval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for qasrl-eval operations.
///
/// Degenerate metrics (zero denominators) and predicted predicates missing
/// from the reference are not errors: the former surface as `None` ratios,
/// the latter are skipped.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid core value, e.g. a malformed span.
    #[error(transparent)]
    Core(#[from] qasrl_core::Error),

    /// Invalid evaluation configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }
}
