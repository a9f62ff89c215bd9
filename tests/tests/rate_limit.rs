//! Tests for per-IP rate limiting at the HTTP surface.
//!
//! Per-email limits interact with duplicate detection and are covered in
//! `duplicate.rs`.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};

/// Test the 11th submission from one IP within the hour is limited
#[tokio::test]
async fn test_ip_hourly_limit() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for _ in 0..10 {
        let response = server
            .post("/api/v1/demo-requests")
            .content_type("application/json")
            .add_header("X-Forwarded-For", "203.0.113.50")
            .bytes(fixtures::demo_request_payload(&fixtures::unique_email()).into())
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    let response = server
        .post("/api/v1/demo-requests")
        .content_type("application/json")
        .add_header("X-Forwarded-For", "203.0.113.50")
        .bytes(fixtures::demo_request_payload(&fixtures::unique_email()).into())
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "RATE_LIMIT_EXCEEDED");
    assert_eq!(
        body["error"]["message"],
        "Too many requests. Please try again later."
    );
    assert_eq!(body["error"]["details"]["retryAfter"], 3600);
}

/// Test one exhausted IP does not affect another
#[tokio::test]
async fn test_ip_limits_are_independent() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for _ in 0..10 {
        let response = server
            .post("/api/v1/demo-requests")
            .content_type("application/json")
            .add_header("X-Forwarded-For", "198.51.100.1")
            .bytes(fixtures::demo_request_payload(&fixtures::unique_email()).into())
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    let blocked = server
        .post("/api/v1/demo-requests")
        .content_type("application/json")
        .add_header("X-Forwarded-For", "198.51.100.1")
        .bytes(fixtures::demo_request_payload(&fixtures::unique_email()).into())
        .await;
    blocked.assert_status(StatusCode::TOO_MANY_REQUESTS);

    let other = server
        .post("/api/v1/demo-requests")
        .content_type("application/json")
        .add_header("X-Forwarded-For", "198.51.100.2")
        .bytes(fixtures::demo_request_payload(&fixtures::unique_email()).into())
        .await;
    other.assert_status(StatusCode::CREATED);
}

/// Test the first entry of a forwarded chain identifies the caller
#[tokio::test]
async fn test_forwarded_chain_uses_first_hop() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for _ in 0..10 {
        let response = server
            .post("/api/v1/demo-requests")
            .content_type("application/json")
            .add_header("X-Forwarded-For", "192.0.2.7, 10.0.0.1")
            .bytes(fixtures::demo_request_payload(&fixtures::unique_email()).into())
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    // Same client behind a different proxy hop is still the same client.
    let response = server
        .post("/api/v1/demo-requests")
        .content_type("application/json")
        .add_header("X-Forwarded-For", "192.0.2.7, 10.0.0.2")
        .bytes(fixtures::demo_request_payload(&fixtures::unique_email()).into())
        .await;
    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
}
