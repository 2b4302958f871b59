//! Authentication error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown admin id or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No bearer token on a protected request.
    #[error("missing bearer token")]
    MissingToken,

    /// Token is malformed or its signature does not verify.
    #[error("invalid token")]
    InvalidToken,

    /// Token signature verifies but the expiry has passed.
    #[error("token expired")]
    TokenExpired,

    /// Serializing or signing the claims failed.
    #[error("token encoding failed")]
    TokenEncoding,

    /// Credential store error.
    #[error("credential store error: {0}")]
    Store(#[from] StoreError),
}
