/**
 * API Error Types
 *
 * This module defines the error taxonomy for the mutation and query
 * surface. Errors are reported synchronously to the caller with a coarse
 * status distinguishing client-caused (bad input, not found, bad
 * credentials) from server-caused (storage failure) conditions.
 *
 * Realtime delivery failures are deliberately absent from this taxonomy:
 * a push to a closed connection is caught and discarded per handle inside
 * the dispatcher and never surfaces to the mutating client.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors produced by the storage layer.
///
/// The in-memory backing never fails; the Postgres backing wraps sqlx.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Errors returned by API handlers.
///
/// Each variant maps to one HTTP status; the response body carries the
/// message as JSON (see the `IntoResponse` impl in `conversion`).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed required field. The request fails before any
    /// store call, so no dispatch can have occurred.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The requested id does not resolve.
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// Missing or invalid credentials / token.
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Storage failure, surfaced as a generic server error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Anything else that should read as a server fault (e.g. token
    /// signing failure).
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable message for the response body.
    ///
    /// Storage errors are not echoed verbatim to clients.
    pub fn message(&self) -> String {
        match self {
            Self::Validation { message }
            | Self::NotFound { message }
            | Self::Unauthorized { message }
            | Self::Internal { message } => message.clone(),
            Self::Store(e) => {
                tracing::error!("Storage error: {:?}", e);
                "Internal server error".to_string()
            }
        }
    }
}
