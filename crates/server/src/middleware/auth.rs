//! Bearer-token authentication extractor for admin routes.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::services::auth::AdminClaims;
use crate::state::AppState;

/// Extractor that requires a valid admin bearer token.
///
/// Reads the `Authorization: Bearer <token>` header and verifies it against
/// the signing secret. A missing token rejects with 401, a malformed or
/// expired one with 403; both carry the standard JSON error body.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminToken(claims): RequireAdminToken,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.sub)
/// }
/// ```
pub struct RequireAdminToken(pub AdminClaims);

impl FromRequestParts<AppState> for RequireAdminToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "));

        let claims = state.auth().verify(token)?;
        Ok(Self(claims))
    }
}
