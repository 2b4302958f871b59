//! Admin route handlers: login, inquiry review, and CSV export.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use amberleaf_core::InquiryStatus;

use crate::error::AppError;
use crate::middleware::RequireAdminToken;
use crate::state::AppState;
use crate::store::{InquiryFilter, InquiryPage};

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;

/// Admin login form data.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

const fn default_page() -> u32 {
    DEFAULT_PAGE
}

const fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Status update body.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(default)]
    pub status: String,
}

/// Generic success acknowledgement.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

/// Admin login.
///
/// POST /api/admin/login
#[instrument(skip(state, request), fields(admin_id = %request.id))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    if request.id.is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest("Missing credentials".to_string()));
    }

    let token = state.auth().login(&request.id, &request.password).await?;

    Ok(Json(LoginResponse {
        success: true,
        token,
    }))
}

/// List inquiries, filtered and paginated, newest first.
///
/// GET /api/admin/inquiries?search=&status=&page=1&limit=10
pub async fn list(
    State(state): State<AppState>,
    RequireAdminToken(_claims): RequireAdminToken,
    Query(query): Query<ListQuery>,
) -> Result<Json<InquiryPage>, AppError> {
    let filter = InquiryFilter {
        search: query.search,
        status: query.status,
        page: query.page.max(1),
        limit: query.limit.max(1),
    };

    let page = state.inquiries().list(&filter).await?;
    Ok(Json(page))
}

/// Update the status of one inquiry.
///
/// PATCH /api/admin/inquiries/{id}
#[instrument(skip(state, _claims, request), fields(id = %id, status = %request.status))]
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdminToken(_claims): RequireAdminToken,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ActionResponse>, AppError> {
    let status: InquiryStatus = request
        .status
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid status".to_string()))?;

    state.inquiries().update_status(&id, status).await?;

    Ok(Json(ActionResponse {
        success: true,
        message: "Status updated".to_string(),
    }))
}

/// Export all inquiries as a CSV attachment.
///
/// GET /api/admin/inquiries/export
pub async fn export_csv(
    State(state): State<AppState>,
    RequireAdminToken(_claims): RequireAdminToken,
) -> Result<impl IntoResponse, AppError> {
    let csv = state.inquiries().export_csv().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"inquiries.csv\"",
            ),
        ],
        csv,
    ))
}
