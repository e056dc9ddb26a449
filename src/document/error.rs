//! Document error types
//!
//! Errors raised while turning raw document bytes into chunks.

use thiserror::Error;

/// Document processing error type
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Malformed or unreadable document bytes
    #[error("Parse failure: {0}")]
    ParseFailure(String),

    /// Chunking options rejected
    #[error("Invalid chunking options: {0}")]
    InvalidOptions(String),

    /// Blocking parse task panicked or was cancelled
    #[error("Parse task failed: {0}")]
    TaskFailed(String),

    /// Timeout error
    #[error("Operation timed out after {0} seconds")]
    Timeout(u64),
}

/// Result type alias for document operations
pub type Result<T> = std::result::Result<T, DocumentError>;

/// Alias for Result (used by callers outside the module)
pub type DocumentResult<T> = Result<T>;

impl From<mupdf::Error> for DocumentError {
    fn from(err: mupdf::Error) -> Self {
        DocumentError::ParseFailure(err.to_string())
    }
}
