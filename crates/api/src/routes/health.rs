//! Health check and service info endpoints.

use axum::Json;
use chrono::{SecondsFormat, Utc};
use telemetry::{health, HealthStatus};

use crate::response::{HealthResponse, ServiceEndpoints, ServiceInfo};

/// GET /health - Health check.
///
/// `degraded` means the durable log is rejecting writes; intake itself keeps
/// working off the in-process cache, so this never turns into a 5xx.
pub async fn health_handler() -> Json<HealthResponse> {
    let report = health().report();

    let status = match report.status {
        HealthStatus::Healthy => "ok",
        HealthStatus::Degraded => "degraded",
    };

    Json(HealthResponse {
        status: status.to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        durable_log_healthy: health().durable_log.is_healthy(),
    })
}

/// GET / - Service info.
pub async fn root_handler() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "AW3 Demo Intake API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ServiceEndpoints {
            health: "/health".to_string(),
            demo_requests: "/api/v1/demo-requests".to_string(),
        },
    })
}
