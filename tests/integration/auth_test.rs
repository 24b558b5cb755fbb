//! Bearer token handling on protected routes.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::{TEST_SECRET, TestApp, sign};

#[tokio::test]
async fn test_missing_token_is_401() {
    let app = TestApp::new().await;

    for path in ["/api/me", "/api/datarooms", "/api/folders", "/api/files/starred"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(response.body["error"], "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn test_non_bearer_scheme_is_401() {
    let app = TestApp::new().await;
    let request = axum::http::Request::builder()
        .uri("/api/datarooms")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .expect("request");

    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid Authorization header format");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_401() {
    let app = TestApp::new().await;
    let token = sign(
        json!({ "sub": Uuid::new_v4(), "exp": chrono::Utc::now().timestamp() + 3600 }),
        "someone-elses-secret",
    );

    let response = app.request("GET", "/api/datarooms", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid token signature");
}

#[tokio::test]
async fn test_expired_token_is_401() {
    let app = TestApp::new().await;
    let token = sign(
        json!({ "sub": Uuid::new_v4(), "exp": chrono::Utc::now().timestamp() - 600 }),
        TEST_SECRET,
    );

    let response = app.request("GET", "/api/files/starred", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Token has expired");
}

#[tokio::test]
async fn test_token_without_uuid_subject_is_401() {
    let app = TestApp::new().await;
    let token = sign(
        json!({ "sub": "not-a-uuid", "exp": chrono::Utc::now().timestamp() + 3600 }),
        TEST_SECRET,
    );

    let response = app.request("GET", "/api/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
