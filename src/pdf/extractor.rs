//! PDF word extraction using MuPDF
//!
//! Opens the document from bytes, walks its pages in order and collects
//! each page's positioned words.

use mupdf::Document;

use crate::document::{DocumentError, PageWords, Result, WordExtractor};
use crate::mupdf::{extract_page_words, WordOptions};

const PDF_MIME: &str = "application/pdf";

/// MuPDF-backed [`WordExtractor`]
#[derive(Debug, Clone, Default)]
pub struct MupdfWordExtractor {
    options: WordOptions,
}

impl MupdfWordExtractor {
    pub fn new(options: WordOptions) -> Self {
        Self { options }
    }
}

impl WordExtractor for MupdfWordExtractor {
    fn extract_words(&self, data: &[u8]) -> Result<Vec<PageWords>> {
        if data.is_empty() {
            return Err(DocumentError::ParseFailure("document is empty".to_string()));
        }

        let doc = Document::from_bytes(data, PDF_MIME)?;
        let page_count = doc.page_count()?;

        let mut pages = Vec::with_capacity(page_count.max(0) as usize);
        for index in 0..page_count {
            let page = doc.load_page(index)?;
            let words = extract_page_words(&page, &self.options)?;
            pages.push(PageWords::new(index as u32 + 1, words));
        }

        tracing::debug!(
            "Extracted {} words from {} pages",
            pages.iter().map(|p| p.words.len()).sum::<usize>(),
            pages.len()
        );

        Ok(pages)
    }
}
