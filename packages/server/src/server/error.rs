//! Mapping pipeline errors onto user-visible responses.
//!
//! Responses carry a fixed message per failure kind; the underlying error
//! is logged here and never returned to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use review_rag::RagError;
use serde_json::json;
use tracing::{error, warn};

/// An error response: status plus a fixed `{"error": ...}` message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
}

impl ApiError {
    /// Missing, blank or malformed request fields.
    pub fn invalid_request() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Invalid request",
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &'static str {
        self.message
    }
}

impl From<RagError> for ApiError {
    fn from(err: RagError) -> Self {
        let (status, message) = match &err {
            RagError::InvalidRequest { .. } | RagError::InvalidUrl { .. } => {
                (StatusCode::BAD_REQUEST, "Invalid request")
            }
            RagError::EmptyCorpus { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "No reviews"),
            RagError::Indexing(_) => (StatusCode::SERVICE_UNAVAILABLE, "Indexing failed"),
            RagError::Synthesis(_) => (StatusCode::BAD_GATEWAY, "Answer synthesis failed"),
            RagError::Extract(_) | RagError::Config(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
            }
        };

        if status.is_server_error() {
            error!(error = %err, status = status.as_u16(), "Request failed");
        } else {
            warn!(error = %err, status = status.as_u16(), "Request rejected");
        }

        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
