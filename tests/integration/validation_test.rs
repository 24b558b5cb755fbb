//! Request validation answered before any store access.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_empty_folder_name_is_400() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());

    let response = app
        .request("POST", "/api/folders", Some(json!({ "name": "" })), Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_overlong_dataroom_name_is_400() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());

    let response = app
        .request(
            "POST",
            "/api/datarooms",
            Some(json!({ "name": "x".repeat(256) })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());
    let request = axum::http::Request::builder()
        .method("PUT")
        .uri(format!("/api/folders/{}", Uuid::new_v4()))
        .header("authorization", format!("Bearer {token}"))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .expect("request");

    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_empty_search_query_is_400() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());
    let path = format!("/api/files/search?q=&dataroom_id={}", Uuid::new_v4());

    let response = app.request("GET", &path, None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_non_uuid_path_is_400() {
    let app = TestApp::new().await;
    let token = app.token_for(Uuid::new_v4());

    let response = app
        .request("GET", "/api/files/not-a-uuid", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
