//! Document chunking
//!
//! Turns a document's positioned words into fixed-size chunks and keeps
//! them cached per document identifier.
//!
//! # Architecture
//!
//! ```text
//!   raw bytes
//!       │
//!       ▼
//! ┌──────────────┐   Vec<PageWords>   ┌──────────────┐   Vec<Chunk>
//! │ WordExtractor│ ─────────────────▶ │ build_chunks │ ───────────┐
//! └──────────────┘                    └──────────────┘            │
//!                                                                 ▼
//!                                                       ┌──────────────────┐
//!                                                       │    ChunkCache    │
//!                                                       │ (one parse per id)│
//!                                                       └──────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use chunklens_server::document::{build_chunks, ChunkCache, ChunkingOptions};
//!
//! let cache = ChunkCache::default();
//! let options = ChunkingOptions::new(20, None)?;
//! let chunks = cache
//!     .get_or_parse("report.pdf", bytes, move |data| {
//!         let pages = extractor.extract_words(&data)?;
//!         Ok(build_chunks(&pages, &options))
//!     })
//!     .await?;
//! ```

mod cache;
mod chunker;
mod error;
mod traits;
mod types;

pub use cache::{CacheStats, ChunkCache, DocumentSummary, DEFAULT_PARSE_TIMEOUT_SECS};
pub use chunker::{build_chunks, build_page_chunks, ChunkingOptions, DEFAULT_BLOCK_SIZE};
pub use error::{DocumentError, DocumentResult, Result};
pub use traits::WordExtractor;
pub use types::{BoundingBox, Chunk, PageWords, PositionedWord, WordMatch};
