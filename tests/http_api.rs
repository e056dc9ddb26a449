//! HTTP API tests
//!
//! Runs the full router against a plain-text word extractor so the
//! ingest and lookup flows can be exercised without real PDF files.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum_test::TestServer;
use serde_json::Value;
use tower::ServiceExt;

use chunklens_server::config::Config;
use chunklens_server::document::{
    Chunk, ChunkingOptions, DocumentError, DocumentResult, PageWords, PositionedWord,
    WordExtractor,
};
use chunklens_server::locator::TargetWords;
use chunklens_server::routes;
use chunklens_server::state::AppState;

const BOUNDARY: &str = "chunklens-test-boundary";

/// Pages separated by form feeds, words by whitespace, one 12pt line per 10 words
struct TextExtractor;

impl WordExtractor for TextExtractor {
    fn extract_words(&self, data: &[u8]) -> DocumentResult<Vec<PageWords>> {
        let text =
            std::str::from_utf8(data).map_err(|e| DocumentError::ParseFailure(e.to_string()))?;
        Ok(text
            .split('\u{c}')
            .enumerate()
            .map(|(page, body)| {
                let words = body
                    .split_whitespace()
                    .enumerate()
                    .map(|(i, w)| {
                        let x = (i % 10) as f64 * 50.0;
                        let y = (i / 10) as f64 * 12.0;
                        PositionedWord::new(w, x, y, x + 45.0, y + 10.0)
                    })
                    .collect();
                PageWords::new(page as u32 + 1, words)
            })
            .collect())
    }
}

fn test_state(block_size: usize, words: &[&str]) -> AppState {
    let config = Config {
        chunking: ChunkingOptions::new(block_size, None).unwrap(),
        ..Config::default()
    };
    AppState::with_extractor(
        config,
        TargetWords::new(words.iter().map(|w| w.to_string()).collect()),
        Arc::new(TextExtractor),
    )
}

fn upload_request(field: &str, filename: &str, data: &[u8]) -> Request<Body> {
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/pdf\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/reader")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn words_text(count: usize, prefix: &str) -> String {
    (0..count)
        .map(|i| format!("{prefix}{i}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[tokio::test]
async fn test_ingest_returns_chunks_per_page() {
    let app = routes::app(test_state(20, &[]));
    let document = format!("{}\u{c}{}", words_text(25, "a"), words_text(5, "b"));

    let (status, body) = send(&app, upload_request("pdf_file", "two-pages.pdf", document.as_bytes())).await;
    assert_eq!(status, StatusCode::OK);

    let chunks: Vec<Chunk> = serde_json::from_value(body).unwrap();
    let pages: Vec<u32> = chunks.iter().map(|c| c.page_number).collect();
    assert_eq!(pages, vec![1, 1, 2]);
    assert_eq!(chunks[1].content, "a20 a21 a22 a23 a24");
    assert!(chunks.iter().all(|c| c.bbox.x1 <= c.bbox.x2 && c.bbox.y1 <= c.bbox.y2));
}

#[tokio::test]
async fn test_reingest_same_name_returns_cached_chunks() {
    let app = routes::app(test_state(10, &[]));

    let (_, first) = send(&app, upload_request("file", "report.pdf", b"alpha beta gamma")).await;
    let (status, second) = send(&app, upload_request("file", "report.pdf", b"new content entirely")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, second);
    assert_eq!(second[0]["content"], "alpha beta gamma");
}

#[tokio::test]
async fn test_ingest_then_extract() {
    let app = routes::app(test_state(4, &["Coupon", "Maturity", "issuer"]));
    send(
        &app,
        upload_request("pdf_file", "bond.pdf", "Issuer Acme\u{c}the Coupon rate is 5%".as_bytes()),
    )
    .await;

    let request = Request::builder()
        .uri("/extract?pdf_name=bond.pdf")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    let slots = body.as_array().unwrap();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0]["page_number"], 2);
    assert!(slots[1].is_null());
    assert_eq!(slots[2]["page_number"], 1);
    assert!(slots[0]["uuid"].is_string());
}

#[tokio::test]
async fn test_unparseable_upload_is_rejected_and_not_cached() {
    let app = routes::app(test_state(10, &["a"]));

    let (status, body) = send(&app, upload_request("pdf_file", "broken.pdf", &[0xff, 0xfe, 0xfd])).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "parse_failure");

    let (status, body) = send(&app, upload_request("pdf_file", "broken.pdf", b"fixed text")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["content"], "fixed text");
}

#[tokio::test]
async fn test_upload_without_file_field() {
    let app = routes::app(test_state(10, &[]));
    let (status, body) = send(&app, upload_request("notes", "x.pdf", b"abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_extract_unknown_document_is_all_null() {
    let server = TestServer::new(routes::app(test_state(10, &["a", "b", "c"]))).unwrap();

    let response = server
        .get("/extract")
        .add_query_param("pdf_name", "never-uploaded.pdf")
        .await;

    response.assert_status_ok();
    let slots = response.json::<Vec<Option<Chunk>>>();
    assert_eq!(slots, vec![None, None, None]);
}

#[tokio::test]
async fn test_words_endpoint_keeps_order() {
    let server = TestServer::new(routes::app(test_state(10, &["Maturity", "Coupon", "ISIN"]))).unwrap();

    let response = server.get("/words").await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Vec<String>>(),
        vec!["Maturity".to_string(), "Coupon".to_string(), "ISIN".to_string()]
    );
}

#[tokio::test]
async fn test_empty_word_list_gives_empty_result() {
    let state = test_state(10, &[]);
    state.ingest("a.pdf", b"some words".to_vec()).await.unwrap();
    let server = TestServer::new(routes::app(state)).unwrap();

    let response = server.get("/extract").add_query_param("pdf_name", "a.pdf").await;
    response.assert_status_ok();
    assert!(response.json::<Vec<Value>>().is_empty());
}

#[tokio::test]
async fn test_compare_and_documents() {
    let state = test_state(10, &["rate", "date"]);
    state.ingest("a.pdf", b"coupon rate".to_vec()).await.unwrap();
    state.ingest("b.pdf", b"maturity date".to_vec()).await.unwrap();
    let server = TestServer::new(routes::app(state)).unwrap();

    let response = server
        .get("/compare")
        .add_query_param("docs", "a.pdf, b.pdf")
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["documents"], serde_json::json!(["a.pdf", "b.pdf"]));
    assert_eq!(body["rows"][0]["word"], "rate");
    assert_eq!(body["rows"][0]["chunks"][0]["content"], "coupon rate");
    assert!(body["rows"][0]["chunks"][1].is_null());
    assert!(body["rows"][1]["chunks"][0].is_null());
    assert_eq!(body["rows"][1]["chunks"][1]["content"], "maturity date");

    let response = server.get("/documents").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["stats"]["documents"], 2);
    assert_eq!(body["documents"][0]["id"], "a.pdf");
    assert_eq!(body["documents"][0]["chunk_count"], 1);
}

#[tokio::test]
async fn test_compare_requires_documents() {
    let server = TestServer::new(routes::app(test_state(10, &["a"]))).unwrap();
    let response = server.get("/compare").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_matches_labels_words() {
    let state = test_state(10, &["Rate", "missing"]);
    state.ingest("a.pdf", b"coupon rate".to_vec()).await.unwrap();
    let server = TestServer::new(routes::app(state)).unwrap();

    let response = server.get("/matches").add_query_param("pdf_name", "a.pdf").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body[0]["word"], "Rate");
    assert_eq!(body[0]["chunk"]["content"], "coupon rate");
    assert!(body[1]["chunk"].is_null());
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::new(routes::app(test_state(10, &[]))).unwrap();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}
