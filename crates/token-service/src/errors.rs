//! Token service error types.
//!
//! All errors map to appropriate HTTP status codes via the `IntoResponse` impl.
//! Signing failures are logged server-side and reported to clients with a
//! generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Token service error type.
///
/// Maps to HTTP status codes:
/// - Configuration, Crypto, Internal: 500 Internal Server Error
/// - BadRequest: 400 Bad Request
#[derive(Debug, Error)]
pub enum TokenServiceError {
    /// Signing credentials or media URL are not configured.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Unexpected failure; the message is returned to the client as is.
    #[error("{0}")]
    Internal(String),
}

impl TokenServiceError {
    /// Returns the HTTP status code for this error (for metrics recording).
    pub fn status_code(&self) -> u16 {
        match self {
            TokenServiceError::Configuration(_)
            | TokenServiceError::Crypto(_)
            | TokenServiceError::Internal(_) => 500,
            TokenServiceError::BadRequest(_) => 400,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

impl IntoResponse for TokenServiceError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            TokenServiceError::Configuration(reason) => {
                tracing::warn!(target: "token.config", reason = %reason, "Request rejected: service not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CONFIGURATION_ERROR",
                    reason.clone(),
                )
            }
            TokenServiceError::BadRequest(reason) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", reason.clone())
            }
            TokenServiceError::Crypto(err) => {
                // Log actual error server-side, return generic message to client
                tracing::error!(target: "token.crypto", error = %err, "Signing operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "CRYPTO_ERROR",
                    "Failed to sign access token".to_string(),
                )
            }
            TokenServiceError::Internal(reason) => {
                tracing::error!(target: "token.internal", reason = %reason, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    reason.clone(),
                )
            }
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}
