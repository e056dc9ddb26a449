//! Document traits
//!
//! The seam between raw document bytes and the chunking engine.

use super::error::Result;
use super::types::PageWords;

/// Turns raw document bytes into ordered, positioned words per page
///
/// Implementations are synchronous and may block; callers run them on
/// the blocking thread pool.
pub trait WordExtractor: Send + Sync {
    /// Extract every page's words, pages in ascending order
    ///
    /// Unreadable input must fail with `DocumentError::ParseFailure`.
    fn extract_words(&self, data: &[u8]) -> Result<Vec<PageWords>>;
}
