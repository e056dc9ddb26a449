//! Error types for the Chunklens server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::document::DocumentError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    #[error("Upload error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Multipart(e) => {
                tracing::warn!("Multipart error: {}", e);
                (e.status(), "bad_request", e.body_text())
            }
            AppError::Document(e) => match e {
                DocumentError::ParseFailure(msg) => {
                    tracing::warn!("Parse failure: {}", msg);
                    (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        "parse_failure",
                        format!("Failed to parse document: {}", msg),
                    )
                }
                DocumentError::Timeout(secs) => {
                    tracing::error!("Parse timed out after {}s", secs);
                    (
                        StatusCode::GATEWAY_TIMEOUT,
                        "timeout",
                        format!("Parsing timed out after {} seconds", secs),
                    )
                }
                other => {
                    tracing::error!("Internal error: {}", other);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal_error",
                        "An internal error occurred".to_string(),
                    )
                }
            },
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
