//! Admin authentication service.
//!
//! Verifies the admin credential and issues stateless, HMAC-SHA256-signed
//! session tokens. A token carries its claims alongside the signature, so
//! verification needs no server-side session state; validity is purely a
//! signature plus expiry check. There is no revocation - logout is the
//! client discarding its token.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::instrument;

use crate::store::CredentialStore;

/// Token lifetime: 24 hours from issuance.
const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Claims embedded in an admin session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin login id.
    pub sub: String,
    /// Admin contact email.
    pub email: String,
    /// Issued-at, Unix seconds.
    pub iat: i64,
    /// Expiry, Unix seconds.
    pub exp: i64,
}

/// Admin authentication service.
///
/// Borrow-built per request from the application state; holds no state of
/// its own beyond references to the credential store and signing secret.
pub struct AuthService<'a> {
    credentials: &'a CredentialStore,
    secret: &'a SecretString,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(credentials: &'a CredentialStore, secret: &'a SecretString) -> Self {
        Self {
            credentials,
            secret,
        }
    }

    /// Login with admin id and password, minting a session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the id or password is
    /// wrong, or `AuthError::Store` if the credential record cannot be read.
    #[instrument(skip(self, password), fields(admin_id = %id))]
    pub async fn login(&self, id: &str, password: &str) -> Result<String, AuthError> {
        let credential = self.credentials.get().await?;

        if credential.id != id {
            return Err(AuthError::InvalidCredentials);
        }
        verify_password(password, &credential.password_hash)?;

        let now = Utc::now().timestamp();
        let claims = AdminClaims {
            sub: credential.id,
            email: credential.email.into_inner(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        tracing::info!("Admin login succeeded");
        sign_token(&claims, self.secret)
    }

    /// Verify a bearer token and return the embedded principal.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingToken` if no token was supplied,
    /// `AuthError::InvalidToken` on a malformed token or bad signature, and
    /// `AuthError::TokenExpired` once the expiry has passed.
    pub fn verify(&self, token: Option<&str>) -> Result<AdminClaims, AuthError> {
        let token = token.ok_or(AuthError::MissingToken)?;
        verify_token(token, self.secret)
    }
}

/// Sign claims into a `payload.signature` token, both parts base64url.
fn sign_token(claims: &AdminClaims, secret: &SecretString) -> Result<String, AuthError> {
    let payload = serde_json::to_vec(claims).map_err(|_| AuthError::TokenEncoding)?;
    let payload_b64 = URL_SAFE_NO_PAD.encode(payload);
    let signature_b64 = compute_signature(&payload_b64, secret)?;
    Ok(format!("{payload_b64}.{signature_b64}"))
}

/// Verify a token's signature and expiry, returning its claims.
fn verify_token(token: &str, secret: &SecretString) -> Result<AdminClaims, AuthError> {
    let (payload_b64, signature_b64) = token.split_once('.').ok_or(AuthError::InvalidToken)?;

    let expected = compute_signature(payload_b64, secret)?;
    if !constant_time_compare(&expected, signature_b64) {
        return Err(AuthError::InvalidToken);
    }

    let payload = URL_SAFE_NO_PAD
        .decode(payload_b64)
        .map_err(|_| AuthError::InvalidToken)?;
    let claims: AdminClaims =
        serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidToken)?;

    if Utc::now().timestamp() >= claims.exp {
        return Err(AuthError::TokenExpired);
    }

    Ok(claims)
}

/// HMAC-SHA256 over the payload, base64url-encoded.
fn compute_signature(payload_b64: &str, secret: &SecretString) -> Result<String, AuthError> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.expose_secret().as_bytes())
        .map_err(|_| AuthError::TokenEncoding)?;
    mac.update(payload_b64.as_bytes());
    Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
}

/// Verify a password against an argon2 PHC hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
