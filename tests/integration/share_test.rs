//! Share creation input checks and public link lookups.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_share_with_invalid_email_is_400() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());
    let path = format!("/api/files/{}/shares", Uuid::new_v4());

    let response = app
        .request("POST", &path, Some(json!({ "email": "nobody" })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_share_permission_is_400() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());
    let path = format!("/api/files/{}/shares", Uuid::new_v4());

    let response = app
        .request("POST", &path, Some(json!({ "permission": "owner" })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_public_token_is_404_without_auth() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/s/short", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");

    let response = app.request("GET", "/api/s/short/download", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
