//! Fixed-size word block chunking
//!
//! Each page's word stream is cut into consecutive blocks of at most
//! `block_size` words. A block becomes one [`Chunk`] with the merged
//! bounding box of its words, a fresh UUID, and its page number.

use uuid::Uuid;

use super::error::{DocumentError, Result};
use super::types::{BoundingBox, Chunk, PageWords, PositionedWord};

/// Default words per block
pub const DEFAULT_BLOCK_SIZE: usize = 101;

/// Chunking configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingOptions {
    block_size: usize,
    line_break_every: Option<usize>,
}

impl Default for ChunkingOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            line_break_every: None,
        }
    }
}

impl ChunkingOptions {
    /// Create options, rejecting a zero block size or a line break
    /// interval outside `1..block_size`
    pub fn new(block_size: usize, line_break_every: Option<usize>) -> Result<Self> {
        if block_size == 0 {
            return Err(DocumentError::InvalidOptions(
                "block size must be at least 1".to_string(),
            ));
        }
        if let Some(k) = line_break_every {
            if block_size < 2 {
                return Err(DocumentError::InvalidOptions(format!(
                    "line breaks need a block size of at least 2, got {}",
                    block_size
                )));
            }
            if k == 0 || k >= block_size {
                return Err(DocumentError::InvalidOptions(format!(
                    "line break interval {} must be between 1 and {}",
                    k,
                    block_size - 1
                )));
            }
        }
        Ok(Self {
            block_size,
            line_break_every,
        })
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn line_break_every(&self) -> Option<usize> {
        self.line_break_every
    }
}

/// Build chunks for a whole document
///
/// Output is page-ascending (in the order `pages` is given) and
/// block-ascending within a page. Pages without words contribute nothing.
pub fn build_chunks(pages: &[PageWords], options: &ChunkingOptions) -> Vec<Chunk> {
    pages
        .iter()
        .flat_map(|page| build_page_chunks(page, options))
        .collect()
}

/// Build chunks for a single page
pub fn build_page_chunks(page: &PageWords, options: &ChunkingOptions) -> Vec<Chunk> {
    page.words
        .chunks(options.block_size)
        .filter_map(|block| {
            let bbox = BoundingBox::enclosing(block)?;
            Some(Chunk {
                content: join_block(block, options.line_break_every),
                bbox,
                id: Uuid::new_v4().to_string(),
                page_number: page.page_number,
            })
        })
        .collect()
}

/// Join words with single spaces, or a newline before every k-th word
fn join_block(block: &[PositionedWord], line_break_every: Option<usize>) -> String {
    let mut content = String::with_capacity(block.iter().map(|w| w.text.len() + 1).sum());
    for (i, word) in block.iter().enumerate() {
        if i > 0 {
            match line_break_every {
                Some(k) if i % k == 0 => content.push('\n'),
                _ => content.push(' '),
            }
        }
        content.push_str(&word.text);
    }
    content
}
