//! Test fixtures and payload builders.

use serde_json::json;
use uuid::Uuid;

/// A minimal valid submission body.
pub fn demo_request(email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "userType": "creator",
        "socialHandle": "@demo_handle",
        "socialPlatform": "telegram",
    })
}

/// A submission body with every optional field set.
pub fn full_demo_request(email: &str) -> serde_json::Value {
    json!({
        "email": email,
        "userType": "project_owner",
        "socialHandle": "project-lead",
        "socialPlatform": "x",
        "source": "landing-page",
        "timestamp": 1_717_243_200_000_i64,
    })
}

/// Serialized minimal submission payload.
pub fn demo_request_payload(email: &str) -> String {
    demo_request(email).to_string()
}

/// A unique email per call, for batches that must dodge duplicate detection.
pub fn unique_email() -> String {
    let tag = Uuid::new_v4().simple().to_string();
    format!("user-{}@example.com", &tag[..8])
}
