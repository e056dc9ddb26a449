//! Document API endpoints
//!
//! - Ingest a PDF and return its chunks
//! - Look up the first chunk for each target word
//! - List the target words
//! - Compare several documents side by side
//! - List cached documents

use axum::{
    extract::{Multipart, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::document::{CacheStats, Chunk, DocumentSummary, WordMatch};
use crate::error::{AppError, Result};
use crate::locator::ComparisonRow;
use crate::state::AppState;

/// Multipart field names accepted for the uploaded file
const FILE_FIELDS: [&str; 3] = ["pdf_file", "file", "pdf"];

/// Create the document router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reader", post(ingest_document))
        .route("/extract", get(extract_words))
        .route("/matches", get(word_matches))
        .route("/words", get(list_words))
        .route("/compare", get(compare_documents))
        .route("/documents", get(list_documents))
}

/// Query parameters for word lookup
#[derive(Debug, Deserialize)]
pub struct ExtractQuery {
    /// Document identifier (the uploaded filename)
    pub pdf_name: String,
}

/// Query parameters for comparison
#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    /// Comma-separated document identifiers
    #[serde(default)]
    pub docs: String,
}

/// Side-by-side comparison response
#[derive(Debug, Serialize)]
pub struct CompareResponse {
    pub documents: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

/// Cached documents response
#[derive(Debug, Serialize)]
pub struct DocumentsResponse {
    pub documents: Vec<DocumentSummary>,
    pub stats: CacheStats,
}

/// Ingest an uploaded PDF
///
/// The uploaded filename is the document identifier. A filename that was
/// already ingested returns the cached chunks and the new bytes are ignored.
async fn ingest_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<Chunk>>> {
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        if !FILE_FIELDS.contains(&name.as_str()) {
            tracing::debug!("Skipping multipart field '{}'", name);
            continue;
        }

        let document_id = field
            .file_name()
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::BadRequest("Uploaded file has no filename".to_string()))?;

        let data = field.bytes().await?;
        tracing::debug!("Received '{}' ({} bytes)", document_id, data.len());

        let chunks = state.ingest(&document_id, data.to_vec()).await?;
        tracing::info!("Document '{}' ready with {} chunks", document_id, chunks.len());

        return Ok(Json(chunks.to_vec()));
    }

    tracing::warn!("No file field found in multipart upload");
    Err(AppError::BadRequest(
        "No file provided. Use field name 'pdf_file', 'file' or 'pdf'".to_string(),
    ))
}

/// First matching chunk per target word; `null` where nothing matched
async fn extract_words(
    State(state): State<AppState>,
    Query(query): Query<ExtractQuery>,
) -> Json<Vec<Option<Chunk>>> {
    Json(state.lookup(&query.pdf_name).await)
}

/// Like `/extract`, with each slot labelled by its word
async fn word_matches(
    State(state): State<AppState>,
    Query(query): Query<ExtractQuery>,
) -> Json<Vec<WordMatch>> {
    Json(state.lookup_matches(&query.pdf_name).await)
}

/// The configured target words, in lookup order
async fn list_words(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.words().as_slice().to_vec())
}

/// One row per target word, one column per requested document
async fn compare_documents(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<CompareResponse>> {
    let documents: Vec<String> = query
        .docs
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if documents.is_empty() {
        return Err(AppError::BadRequest(
            "Provide at least one document in 'docs'".to_string(),
        ));
    }

    let rows = state.compare(&documents).await;
    Ok(Json(CompareResponse { documents, rows }))
}

/// Cached documents with their chunk counts
async fn list_documents(State(state): State<AppState>) -> Json<DocumentsResponse> {
    Json(DocumentsResponse {
        documents: state.cache().documents().await,
        stats: state.cache().stats().await,
    })
}
