//! Tests for listing demo requests: ordering, pagination, and parameter
//! handling.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};

async fn submit_n(server: &TestServer, n: usize) -> Vec<String> {
    let mut emails = Vec::with_capacity(n);
    for _ in 0..n {
        let email = fixtures::unique_email();
        let response = server
            .post("/api/v1/demo-requests")
            .content_type("application/json")
            .bytes(fixtures::demo_request_payload(&email).into())
            .await;
        response.assert_status(StatusCode::CREATED);
        emails.push(email);
    }
    emails
}

/// Test listing an empty store returns an empty page with metadata
#[tokio::test]
async fn test_list_empty() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let response = server.get("/api/v1/demo-requests").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["requesters"], serde_json::json!([]));
    assert_eq!(body["data"]["pagination"]["currentPage"], 0);
    assert_eq!(body["data"]["pagination"]["pageSize"], 20);
    assert_eq!(body["data"]["pagination"]["totalElements"], 0);
    assert_eq!(body["data"]["pagination"]["totalPages"], 0);
}

/// Test records come back newest first with correct pagination metadata
#[tokio::test]
async fn test_list_sorted_and_paginated() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let emails = submit_n(&server, 5).await;

    let response = server.get("/api/v1/demo-requests?page=0&size=2").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    let requesters = body["data"]["requesters"]
        .as_array()
        .expect("requesters should be an array");
    assert_eq!(requesters.len(), 2);
    assert_eq!(requesters[0]["email"], emails[4].as_str());
    assert_eq!(requesters[1]["email"], emails[3].as_str());
    assert_eq!(body["data"]["pagination"]["currentPage"], 0);
    assert_eq!(body["data"]["pagination"]["pageSize"], 2);
    assert_eq!(body["data"]["pagination"]["totalElements"], 5);
    assert_eq!(body["data"]["pagination"]["totalPages"], 3);

    let last = server.get("/api/v1/demo-requests?page=2&size=2").await;
    last.assert_status_ok();
    let last: serde_json::Value = last.json();
    let tail = last["data"]["requesters"]
        .as_array()
        .expect("requesters should be an array");
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0]["email"], emails[0].as_str());
}

/// Test a page past the end is empty but keeps the metadata
#[tokio::test]
async fn test_list_page_beyond_end() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    submit_n(&server, 3).await;

    let response = server.get("/api/v1/demo-requests?page=7&size=2").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["requesters"], serde_json::json!([]));
    assert_eq!(body["data"]["pagination"]["currentPage"], 7);
    assert_eq!(body["data"]["pagination"]["totalElements"], 3);
    assert_eq!(body["data"]["pagination"]["totalPages"], 2);
}

/// Test out-of-range pagination parameters are rejected
#[tokio::test]
async fn test_list_invalid_parameters() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    for query in ["page=-1", "size=0", "size=101"] {
        let response = server
            .get(&format!("/api/v1/demo-requests?{query}"))
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["success"], false, "query {query}");
        assert_eq!(body["error"]["code"], "INVALID_PARAMETERS", "query {query}");
        assert_eq!(
            body["error"]["message"],
            "Invalid pagination parameters",
            "query {query}"
        );
    }
}

/// Test unparseable pagination parameters fall back to the defaults
#[tokio::test]
async fn test_list_defaults_on_unparseable_parameters() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    submit_n(&server, 1).await;

    let response = server.get("/api/v1/demo-requests?page=abc&size=").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["data"]["pagination"]["currentPage"], 0);
    assert_eq!(body["data"]["pagination"]["pageSize"], 20);
    assert_eq!(body["data"]["pagination"]["totalElements"], 1);
    assert_eq!(body["data"]["pagination"]["totalPages"], 1);
}

/// Test listed records carry the full stored shape
#[tokio::test]
async fn test_list_record_shape() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let email = fixtures::unique_email();
    let response = server
        .post("/api/v1/demo-requests")
        .content_type("application/json")
        .add_header("X-Forwarded-For", "203.0.113.77")
        .bytes(fixtures::full_demo_request(&email).to_string().into())
        .await;
    response.assert_status(StatusCode::CREATED);

    let listed = server.get("/api/v1/demo-requests").await;
    listed.assert_status_ok();
    let body: serde_json::Value = listed.json();
    let record = &body["data"]["requesters"][0];

    assert!(record["requestId"]
        .as_str()
        .expect("requestId should be a string")
        .starts_with("req_"));
    assert_eq!(record["email"], email.as_str());
    assert_eq!(record["userType"], "project_owner");
    assert_eq!(record["socialHandle"], "project-lead");
    assert_eq!(record["socialPlatform"], "x");
    assert_eq!(record["source"], "landing-page");
    assert_eq!(record["timestamp"], 1_717_243_200_000_i64);
    assert_eq!(record["ipAddress"], "203.0.113.77");
    assert!(record["createdAt"].is_string());
}

/// Test a submission without optional fields lists with a null source
#[tokio::test]
async fn test_list_minimal_record_has_null_source() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    submit_n(&server, 1).await;

    let listed = server.get("/api/v1/demo-requests").await;
    let body: serde_json::Value = listed.json();
    let record = &body["data"]["requesters"][0];

    assert!(record["source"].is_null());
    assert_eq!(record["ipAddress"], "unknown");
    assert!(record["timestamp"].is_i64());
}
