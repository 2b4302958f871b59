//! Admin authentication and authorization tests.

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use amberleaf_integration_tests::TestServer;

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_with_default_credentials_returns_usable_token() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client
        .post(server.url("/api/admin/login"))
        .json(&json!({"id": "admin", "password": "admin123"}))
        .send()
        .await
        .expect("login request");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("login body");
    assert_eq!(body["success"], true);
    let token = body["token"].as_str().expect("token");

    // The token is accepted on a protected route
    let resp = client
        .get(server.url("/api/admin/inquiries"))
        .bearer_auth(token)
        .send()
        .await
        .expect("list request");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client
        .post(server.url("/api/admin/login"))
        .json(&json!({"id": "admin", "password": "wrong-password"}))
        .send()
        .await
        .expect("login request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["error"], "Invalid credentials");
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn test_login_with_unknown_id_is_unauthorized() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client
        .post(server.url("/api/admin/login"))
        .json(&json!({"id": "root", "password": "admin123"}))
        .send()
        .await
        .expect("login request");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_missing_credentials_is_bad_request() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client
        .post(server.url("/api/admin/login"))
        .json(&json!({"id": "admin"}))
        .send()
        .await
        .expect("login request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["error"], "Missing credentials");
}

// ============================================================================
// Token enforcement
// ============================================================================

#[tokio::test]
async fn test_protected_routes_require_a_token() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client
        .get(server.url("/api/admin/inquiries"))
        .send()
        .await
        .expect("list request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .patch(server.url("/api/admin/inquiries/123"))
        .json(&json!({"status": "processed"}))
        .send()
        .await
        .expect("patch request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .get(server.url("/api/admin/inquiries/export"))
        .send()
        .await
        .expect("export request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbage_token_is_forbidden() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client
        .get(server.url("/api/admin/inquiries"))
        .bearer_auth("definitely-not-a-signed-token")
        .send()
        .await
        .expect("list request");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn test_unsigned_token_is_forbidden() {
    // Structurally valid token shape, signature not produced by the server
    let server = TestServer::spawn().await;
    let client = Client::new();

    let forged = format!(
        "{}.{}",
        "eyJzdWIiOiJhZG1pbiIsImVtYWlsIjoiYUB4LmNvbSIsImlhdCI6MCwiZXhwIjo5OTk5OTk5OTk5fQ",
        "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"
    );

    let resp = client
        .get(server.url("/api/admin/inquiries"))
        .bearer_auth(&forged)
        .send()
        .await
        .expect("list request");

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

// ============================================================================
// Status updates
// ============================================================================

#[tokio::test]
async fn test_update_status_rejects_invalid_value() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let login: Value = client
        .post(server.url("/api/admin/login"))
        .json(&json!({"id": "admin", "password": "admin123"}))
        .send()
        .await
        .expect("login request")
        .json()
        .await
        .expect("login body");
    let token = login["token"].as_str().expect("token");

    let resp = client
        .patch(server.url("/api/admin/inquiries/123"))
        .bearer_auth(token)
        .json(&json!({"status": "archived"}))
        .send()
        .await
        .expect("patch request");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["error"], "Invalid status");
}

#[tokio::test]
async fn test_update_status_unknown_id_is_not_found() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let login: Value = client
        .post(server.url("/api/admin/login"))
        .json(&json!({"id": "admin", "password": "admin123"}))
        .send()
        .await
        .expect("login request")
        .json()
        .await
        .expect("login body");
    let token = login["token"].as_str().expect("token");

    let resp = client
        .patch(server.url("/api/admin/inquiries/does-not-exist"))
        .bearer_auth(token)
        .json(&json!({"status": "processed"}))
        .send()
        .await
        .expect("patch request");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = resp.json().await.expect("error body");
    assert_eq!(body["error"], "Inquiry not found");
}
