//! Error Taxonomy
//!
//! Every failure a node can report to a caller. Required dependencies (stock
//! check, the catalog read or write a request needs) surface these errors;
//! best-effort side effects log them and move on.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookstoreError {
    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Book out of stock: {0}")]
    OutOfStock(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BookstoreError {
    pub fn status(&self) -> StatusCode {
        match self {
            BookstoreError::NotFound(_) => StatusCode::NOT_FOUND,
            BookstoreError::OutOfStock(_) => StatusCode::CONFLICT,
            BookstoreError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            BookstoreError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BookstoreError::Storage(_) | BookstoreError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Rebuilds an error from a peer's response so refusals pass through
    /// a forwarding node unchanged.
    pub fn from_peer(status: StatusCode, subject: &str, body: Option<ErrorResponse>) -> Self {
        let detail = body
            .map(|b| b.error)
            .unwrap_or_else(|| format!("peer responded {}", status));
        match status {
            StatusCode::NOT_FOUND => BookstoreError::NotFound(subject.to_string()),
            StatusCode::CONFLICT => BookstoreError::OutOfStock(subject.to_string()),
            StatusCode::BAD_REQUEST => BookstoreError::InvalidRequest(detail),
            _ => BookstoreError::UpstreamUnavailable(detail),
        }
    }
}

impl From<reqwest::Error> for BookstoreError {
    fn from(err: reqwest::Error) -> Self {
        BookstoreError::UpstreamUnavailable(err.to_string())
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for BookstoreError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::debug!("{}", self);
        }
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

pub type Result<T> = std::result::Result<T, BookstoreError>;
