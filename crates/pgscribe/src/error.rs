//! Error types for pgscribe

use thiserror::Error;

/// Result type alias for statement generation
pub type ScribeResult<T> = Result<T, ScribeError>;

/// Error types for statement generation
///
/// Generation performs no I/O, so every failure is a programming error on
/// one side of the API boundary or the other: `Internal` means the input
/// tree violated a generator invariant (a bug upstream or here), `Usage`
/// means the call itself was malformed.
#[derive(Debug, Error)]
pub enum ScribeError {
    /// Generator invariant violation
    #[error("Internal generator error: {0}")]
    Internal(String),

    /// Malformed call, reported at the offending call site
    #[error("Usage error: {0}")]
    Usage(String),
}

impl ScribeError {
    /// Create an internal invariant-violation error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    /// Check if this is an internal invariant violation
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    /// Check if this is a usage error
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::Usage(_))
    }
}
