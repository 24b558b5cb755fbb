//! Liveness and routing basics.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/nope", None, None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_app_uses_test_auth_settings() {
    let app = TestApp::new().await;
    assert_eq!(app.config.auth.leeway_seconds, 0);
    assert_eq!(app.config.server.port, 8080);
}

#[tokio::test]
async fn test_readiness_without_database_is_503() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health/ready", None, None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["error"], "SERVICE_UNAVAILABLE");
    assert_eq!(response.body["details"]["database"], "unreachable");
    assert_eq!(response.body["details"]["storage"], "available");
    assert_eq!(response.body["details"]["storage_provider"], "local");
}
