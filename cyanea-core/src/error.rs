//! Structured error types for the Cyanea ecosystem.

use thiserror::Error;

/// Unified error type for all Cyanea operations.
#[derive(Debug, Error)]
pub enum CyaneaError {
    /// Invalid input (bad arguments, out-of-range values, malformed configuration)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The caller requested early termination through a cancellation token.
    ///
    /// Not a failure of the operation itself; no partial result accompanies it.
    #[error("operation cancelled")]
    Cancelled,

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CyaneaError {
    /// Whether this value reports a caller-requested abort rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CyaneaError::Cancelled)
    }
}

/// Convenience alias used throughout the Cyanea ecosystem.
pub type Result<T> = std::result::Result<T, CyaneaError>;
