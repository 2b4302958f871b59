//! Public inquiry submission route handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use amberleaf_core::{Email, NewInquiry};

use crate::error::AppError;
use crate::state::AppState;

/// Inquiry form data.
///
/// Fields default to empty so a missing field behaves like an empty one and
/// gets the same 400 response instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SubmitInquiryRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub product: String,
    #[serde(default)]
    pub message: String,
}

/// Response for a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmitInquiryResponse {
    pub success: bool,
    pub message: String,
}

/// Submit a product inquiry.
///
/// POST /api/inquiries
///
/// Persists the inquiry, then dispatches the admin notification email on a
/// detached task. The response does not wait for, and is never affected by,
/// the outcome of the notification.
#[instrument(skip(state, request), fields(email = %request.email, product = %request.product))]
pub async fn submit(
    State(state): State<AppState>,
    Json(request): Json<SubmitInquiryRequest>,
) -> Result<Json<SubmitInquiryResponse>, AppError> {
    let email = Email::parse(request.email.trim())?;

    let input = NewInquiry {
        name: request.name.trim().to_owned(),
        email,
        phone: request
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|phone| !phone.is_empty())
            .map(ToOwned::to_owned),
        product: request.product.trim().to_owned(),
        message: request.message.trim().to_owned(),
    };

    let stored = state.inquiries().append(input).await?;

    if let Some(email_service) = state.email() {
        let email_service = email_service.clone();
        let inquiry = stored.clone();
        tokio::spawn(async move {
            if let Err(e) = email_service.notify_new_inquiry(&inquiry).await {
                tracing::warn!(
                    error = %e,
                    id = %inquiry.id,
                    "Inquiry notification failed"
                );
            }
        });
    }

    Ok(Json(SubmitInquiryResponse {
        success: true,
        message: "Inquiry submitted successfully".to_string(),
    }))
}
