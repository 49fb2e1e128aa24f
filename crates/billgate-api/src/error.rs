//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Only used when the gateway answers explicitly; in silent mode denials
//! never reach this type. Upstream transport failures always do.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "BAD_GATEWAY").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// Application-level error type for the gateway.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or unknown session (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Bill not released to this caller, for whatever reason (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal document service unreachable or broken (502).
    /// Message is logged but not returned to the client.
    #[error("bad gateway: {0}")]
    BadGateway(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::BadGateway(_) => (StatusCode::BAD_GATEWAY, "BAD_GATEWAY"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::BadGateway(_) => "Upstream document service unavailable".to_string(),
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::BadGateway(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<billgate_client::ClientError> for AppError {
    fn from(err: billgate_client::ClientError) -> Self {
        match &err {
            billgate_client::ClientError::Http { .. } => Self::BadGateway(err.to_string()),
            billgate_client::ClientError::InvalidToken => Self::Internal(err.to_string()),
        }
    }
}
