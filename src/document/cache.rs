//! Per-document chunk cache
//!
//! Maps a document identifier to the chunks built from it. A document is
//! parsed at most once for the lifetime of the cache: identity is the
//! identifier alone, so re-ingesting changed bytes under a known name
//! returns the chunks from the first parse. Callers that need a fresh parse
//! must pick a new identifier.
//!
//! # Thread Safety
//!
//! Every identifier owns a `tokio::sync::OnceCell` slot. The map lock is only
//! held to find or create a slot; the parse itself runs inside the slot's
//! initialization, so concurrent first requests for one identifier share a
//! single parse while different identifiers parse in parallel.
//!
//! Initialization runs on a spawned task rather than in the caller's future.
//! A caller that is dropped or times out stops waiting, but the parse it
//! started still completes and fills the slot, so a later request never
//! starts a second parse of the same identifier. A failed parse removes its
//! empty slot once no other request is waiting on it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{OnceCell, RwLock};
use tokio::time::{timeout, Duration};

use super::error::{DocumentError, Result};
use super::types::Chunk;

/// Default wait limit for a document parse; 0 waits indefinitely
pub const DEFAULT_PARSE_TIMEOUT_SECS: u64 = 0;

/// A parsed document as stored in the cache
#[derive(Debug, Clone)]
struct CachedDocument {
    chunks: Arc<[Chunk]>,
    ingested_at: DateTime<Utc>,
}

type Slot = Arc<OnceCell<CachedDocument>>;

/// Summary of a cached document
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub id: String,
    pub chunk_count: usize,
    pub page_count: usize,
    pub ingested_at: DateTime<Utc>,
}

/// Cache statistics
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Number of successfully parsed documents
    pub documents: usize,
    /// Total chunks across all documents
    pub chunks: usize,
    /// Parses started since creation, failed ones included
    pub parses: usize,
}

/// Thread-safe chunk cache keyed by document identifier
#[derive(Clone)]
pub struct ChunkCache {
    slots: Arc<RwLock<HashMap<String, Slot>>>,
    parse_timeout: Option<Duration>,
    parses: Arc<AtomicUsize>,
}

impl Default for ChunkCache {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ChunkCache {
    /// Create an empty cache; `None` waits for parses without a limit
    pub fn new(parse_timeout: Option<Duration>) -> Self {
        Self {
            slots: Arc::new(RwLock::new(HashMap::new())),
            parse_timeout,
            parses: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Return the chunks for `document_id`, parsing `data` on first use
    ///
    /// On a hit `parse_fn` is not invoked and `data` is ignored. On a miss
    /// `parse_fn(data)` runs on the blocking thread pool and its result is
    /// stored only if it succeeds. The parse timeout bounds how long this
    /// call waits, not the parse itself.
    pub async fn get_or_parse<F>(
        &self,
        document_id: &str,
        data: Vec<u8>,
        parse_fn: F,
    ) -> Result<Arc<[Chunk]>>
    where
        F: FnOnce(Vec<u8>) -> Result<Vec<Chunk>> + Send + 'static,
    {
        let slot = self.slot(document_id).await;

        if let Some(doc) = slot.get() {
            tracing::debug!("Cache hit for '{}'", document_id);
            return Ok(doc.chunks.clone());
        }

        let cache = self.clone();
        let id = document_id.to_string();
        let task = tokio::spawn(async move {
            let result = slot
                .get_or_try_init(|| cache.parse(&id, data, parse_fn))
                .await
                .map(|doc| doc.chunks.clone());

            if result.is_err() {
                cache.evict_empty(&id, slot).await;
            }
            result
        });

        let joined = match self.parse_timeout {
            Some(limit) => timeout(limit, task).await.map_err(|_| {
                tracing::warn!(
                    "Gave up waiting for '{}' after {:?}; parse continues",
                    document_id,
                    limit
                );
                DocumentError::Timeout(limit.as_secs())
            })?,
            None => task.await,
        };

        joined.map_err(|e| DocumentError::TaskFailed(e.to_string()))?
    }

    /// Run the parse off the async runtime
    async fn parse<F>(&self, document_id: &str, data: Vec<u8>, parse_fn: F) -> Result<CachedDocument>
    where
        F: FnOnce(Vec<u8>) -> Result<Vec<Chunk>> + Send + 'static,
    {
        self.parses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Parsing '{}' ({} bytes)", document_id, data.len());

        let chunks = tokio::task::spawn_blocking(move || parse_fn(data))
            .await
            .map_err(|e| DocumentError::TaskFailed(e.to_string()))??;

        tracing::info!("Cached '{}' with {} chunks", document_id, chunks.len());

        Ok(CachedDocument {
            chunks: chunks.into(),
            ingested_at: Utc::now(),
        })
    }

    /// Drop a slot left empty by a failed parse
    ///
    /// The slot stays if it was filled meanwhile, was replaced, or another
    /// request still holds it; that request evicts it if its own parse fails.
    async fn evict_empty(&self, document_id: &str, slot: Slot) {
        let mut slots = self.slots.write().await;
        let Some(current) = slots.get(document_id) else {
            return;
        };
        // One reference in the map, one here
        if Arc::ptr_eq(current, &slot) && !slot.initialized() && Arc::strong_count(&slot) == 2 {
            slots.remove(document_id);
            tracing::debug!("Removed empty slot for '{}'", document_id);
        }
    }

    /// Find or create the slot for an identifier
    async fn slot(&self, document_id: &str) -> Slot {
        {
            let slots = self.slots.read().await;
            if let Some(slot) = slots.get(document_id) {
                return slot.clone();
            }
        }

        let mut slots = self.slots.write().await;
        slots
            .entry(document_id.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// Get cached chunks without parsing
    pub async fn get(&self, document_id: &str) -> Option<Arc<[Chunk]>> {
        let slots = self.slots.read().await;
        slots
            .get(document_id)
            .and_then(|slot| slot.get())
            .map(|doc| doc.chunks.clone())
    }

    /// Check if a document has been parsed
    pub async fn contains(&self, document_id: &str) -> bool {
        self.get(document_id).await.is_some()
    }

    /// Summaries of all parsed documents, sorted by identifier
    pub async fn documents(&self) -> Vec<DocumentSummary> {
        let slots = self.slots.read().await;
        let mut summaries: Vec<DocumentSummary> = slots
            .iter()
            .filter_map(|(id, slot)| {
                let doc = slot.get()?;
                let mut pages: Vec<u32> = doc.chunks.iter().map(|c| c.page_number).collect();
                pages.dedup();
                Some(DocumentSummary {
                    id: id.clone(),
                    chunk_count: doc.chunks.len(),
                    page_count: pages.len(),
                    ingested_at: doc.ingested_at,
                })
            })
            .collect();
        summaries.sort_by(|a, b| a.id.cmp(&b.id));
        summaries
    }

    /// Get the number of parsed documents
    pub async fn len(&self) -> usize {
        let slots = self.slots.read().await;
        slots.values().filter(|slot| slot.initialized()).count()
    }

    /// Check if no document has been parsed yet
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        let slots = self.slots.read().await;
        let (documents, chunks) = slots
            .values()
            .filter_map(|slot| slot.get())
            .fold((0, 0), |(docs, chunks), doc| (docs + 1, chunks + doc.chunks.len()));

        CacheStats {
            documents,
            chunks,
            parses: self.parses.load(Ordering::Relaxed),
        }
    }
}
