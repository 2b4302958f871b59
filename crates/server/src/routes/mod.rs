//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Public
//! POST /api/inquiries                  - Submit a product inquiry
//! POST /api/admin/login                - Admin login, returns bearer token
//! GET  /api/health                     - Health check
//!
//! # Admin (Bearer token)
//! GET   /api/admin/inquiries           - List inquiries (search/status/page/limit)
//! PATCH /api/admin/inquiries/{id}      - Update inquiry status
//! GET   /api/admin/inquiries/export    - Export all inquiries as CSV
//! ```

pub mod admin;
pub mod inquiries;

use axum::{
    Json, Router,
    routing::{get, patch, post},
};
use chrono::Utc;
use serde_json::{Value, json};

use crate::state::AppState;

/// Create the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/inquiries", post(inquiries::submit))
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/inquiries", get(admin::list))
        .route("/api/admin/inquiries/export", get(admin::export_csv))
        .route("/api/admin/inquiries/{id}", patch(admin::update_status))
        .route("/api/health", get(health))
}

/// Health check endpoint.
///
/// Returns OK with the current timestamp. Does not check dependencies.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
