//! Tests for the health, service info, and fallback surfaces.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::setup::TestContext;

/// Test /health reports ok with the durable log healthy
#[tokio::test]
async fn test_health_endpoint() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
    assert_eq!(body["durable_log_healthy"], true);
}

/// Test the root endpoint serves service info
#[tokio::test]
async fn test_root_endpoint() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["name"], "AW3 Demo Intake API");
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["endpoints"]["health"], "/health");
    assert_eq!(body["endpoints"]["demoRequests"], "/api/v1/demo-requests");
}

/// Test unknown routes answer with the enveloped 404
#[tokio::test]
async fn test_unknown_route_returns_enveloped_404() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/api/v1/nope").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["error"]["message"], "Endpoint /api/v1/nope not found");
    assert!(body["timestamp"].is_string());
}

/// Test the wrong method on a known path is refused
#[tokio::test]
async fn test_wrong_method_not_allowed() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.post("/health").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
