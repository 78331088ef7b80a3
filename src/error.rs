//! Error types for the cache and read-through client
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Client Error Enum ==
/// Errors surfaced to callers of a read-through fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Transport failure or non-2xx status
    #[error("Request failed for {url}: {reason}")]
    RequestFailed {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// Response body did not match the expected shape
    #[error("Could not decode response from {url}: {reason}")]
    DecodeFailed { url: String, reason: String },
}

impl ClientError {
    pub fn transport(url: impl Into<String>, reason: impl ToString) -> Self {
        ClientError::RequestFailed {
            url: url.into(),
            status: None,
            reason: reason.to_string(),
        }
    }

    pub fn decode(url: impl Into<String>, reason: impl ToString) -> Self {
        ClientError::DecodeFailed {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

// == Store Error Enum ==
/// Durable store failures. Never surfaced past the durable tier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store rejected a write (quota, I/O)
    #[error("Durable store rejected write for {key}: {reason}")]
    WriteFailed { key: String, reason: String },

    /// The stored entry could not be read or parsed
    #[error("Durable store entry {key} unreadable: {reason}")]
    ReadFailed { key: String, reason: String },
}

// == IntoResponse Implementation ==
impl IntoResponse for ClientError {
    fn into_response(self) -> Response {
        let status = match &self {
            ClientError::RequestFailed {
                status: Some(404), ..
            } => StatusCode::NOT_FOUND,
            ClientError::RequestFailed { .. } => StatusCode::BAD_GATEWAY,
            ClientError::DecodeFailed { .. } => StatusCode::BAD_GATEWAY,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for read-through operations.
pub type Result<T> = std::result::Result<T, ClientError>;
