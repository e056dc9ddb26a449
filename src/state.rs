//! Application state management

use std::sync::Arc;

use tokio::time::Duration;

use crate::config::Config;
use crate::document::{build_chunks, Chunk, ChunkCache, DocumentResult, WordExtractor, WordMatch};
use crate::locator::{self, ComparisonRow, TargetWords};
use crate::pdf::MupdfWordExtractor;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    words: TargetWords,
    cache: ChunkCache,
    extractor: Arc<dyn WordExtractor>,
}

impl AppState {
    /// Create the state with the MuPDF word extractor
    pub fn new(config: Config, words: TargetWords) -> Self {
        let extractor = Arc::new(MupdfWordExtractor::new(config.extraction));
        Self::with_extractor(config, words, extractor)
    }

    /// Create the state with a custom word extractor
    pub fn with_extractor(
        config: Config,
        words: TargetWords,
        extractor: Arc<dyn WordExtractor>,
    ) -> Self {
        let parse_timeout = match config.parse_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Self {
            inner: Arc::new(AppStateInner {
                config,
                words,
                cache: ChunkCache::new(parse_timeout),
                extractor,
            }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the target word list
    pub fn words(&self) -> &TargetWords {
        &self.inner.words
    }

    /// Get the chunk cache
    pub fn cache(&self) -> &ChunkCache {
        &self.inner.cache
    }

    /// Chunks for a document, parsing `data` only if the id is new
    pub async fn ingest(&self, document_id: &str, data: Vec<u8>) -> DocumentResult<Arc<[Chunk]>> {
        let extractor = self.inner.extractor.clone();
        let options = self.inner.config.chunking;

        self.inner
            .cache
            .get_or_parse(document_id, data, move |data| {
                let pages = extractor.extract_words(&data)?;
                Ok(build_chunks(&pages, &options))
            })
            .await
    }

    /// Match result for a document; all `None` when it was never ingested
    pub async fn lookup(&self, document_id: &str) -> Vec<Option<Chunk>> {
        match self.inner.cache.get(document_id).await {
            Some(chunks) => self.inner.words.locate(&chunks),
            None => self.inner.words.locate(&[]),
        }
    }

    /// Match result paired with each target word
    pub async fn lookup_matches(&self, document_id: &str) -> Vec<WordMatch> {
        let chunks = self.inner.cache.get(document_id).await;
        self.inner
            .words
            .matches(chunks.as_deref().unwrap_or_default())
    }

    /// Side-by-side match table for several documents
    pub async fn compare(&self, document_ids: &[String]) -> Vec<ComparisonRow> {
        let cached = futures::future::join_all(
            document_ids.iter().map(|id| self.inner.cache.get(id)),
        )
        .await;

        let columns: Vec<&[Chunk]> = cached
            .iter()
            .map(|chunks| chunks.as_deref().unwrap_or_default())
            .collect();

        locator::compare(self.inner.words.as_slice(), &columns)
    }
}
