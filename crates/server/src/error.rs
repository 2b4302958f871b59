//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`; every error response body is a JSON object with a
//! human-readable `error` message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use amberleaf_core::{EmailError, ValidationError};

use crate::services::auth::AuthError;
use crate::store::StoreError;

/// Application-level error type for the inquiry service.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required inquiry field is missing or empty.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The submitted email address is malformed.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Document store operation failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code for this error.
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidEmail(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::MissingToken => {
                    StatusCode::UNAUTHORIZED
                }
                AuthError::InvalidToken | AuthError::TokenExpired => StatusCode::FORBIDDEN,
                AuthError::TokenEncoding | AuthError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Store(err) => match err {
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Validation(_) => StatusCode::BAD_REQUEST,
                StoreError::Io(_) | StoreError::DataCorruption(_) | StoreError::PasswordHash => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Internal details never leak.
    fn client_message(&self) -> String {
        match self {
            Self::Validation(err) | Self::Store(StoreError::Validation(err)) => err.to_string(),
            Self::InvalidEmail(err) => err.to_string(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials => "Invalid credentials".to_string(),
                AuthError::MissingToken => "Missing authentication token".to_string(),
                AuthError::InvalidToken | AuthError::TokenExpired => {
                    "Invalid or expired token".to_string()
                }
                AuthError::TokenEncoding | AuthError::Store(_) => {
                    "Internal server error".to_string()
                }
            },
            Self::Store(StoreError::NotFound(_)) => "Inquiry not found".to_string(),
            Self::Store(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::BadRequest(message) | Self::NotFound(message) => message.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        (status, Json(json!({ "error": self.client_message() }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
