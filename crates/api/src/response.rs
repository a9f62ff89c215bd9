//! Standardized API responses.
//!
//! Every body is wrapped in the same envelope: `{success, data, timestamp}`
//! on success, `{success, error, timestamp}` on failure. The timestamp is
//! the response-generation time, distinct from any `createdAt` inside the
//! data.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

fn envelope_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            message: None,
            timestamp: envelope_timestamp(),
        }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.into()),
            timestamp: envelope_timestamp(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub durable_log_healthy: bool,
}

/// Service info served at the root.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub endpoints: ServiceEndpoints,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEndpoints {
    pub health: String,
    pub demo_requests: String,
}

/// Error payload inside the envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: ErrorBody,
    pub timestamp: String,
}

/// API error carrying the HTTP status alongside the enveloped body.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
    pub retry_after: Option<u64>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                code,
                message: message.into(),
                details: None,
            },
            retry_after: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.body.details = Some(details);
        self
    }

    pub fn validation(details: Value) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Invalid request data",
        )
        .with_details(details)
    }

    pub fn not_found(path: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Endpoint {path} not found"),
        )
    }

    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "An unexpected error occurred. Please try again later.",
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = ErrorEnvelope {
            success: false,
            error: self.body,
            timestamp: envelope_timestamp(),
        };
        let mut response = (self.status, Json(envelope)).into_response();

        // Rate-limited clients also get the delay as a header.
        if let Some(retry_after) = self.retry_after {
            if let Ok(value) = retry_after.to_string().parse() {
                response.headers_mut().insert("Retry-After", value);
            }
        }

        response
    }
}

impl From<intake_core::Error> for ApiError {
    fn from(err: intake_core::Error) -> Self {
        let status = StatusCode::from_u16(err.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let code = err.error_code();

        match err {
            intake_core::Error::Validation(errors) => Self {
                status,
                body: ErrorBody {
                    code,
                    message: "Invalid request data".into(),
                    details: Some(json!(errors)),
                },
                retry_after: None,
            },
            intake_core::Error::RateLimited {
                retry_after_secs, ..
            } => Self {
                status,
                body: ErrorBody {
                    code,
                    message: "Too many requests. Please try again later.".into(),
                    details: Some(json!({ "retryAfter": retry_after_secs })),
                },
                retry_after: Some(retry_after_secs),
            },
            intake_core::Error::Duplicate {
                existing_request_id,
                submitted_at,
            } => Self {
                status,
                body: ErrorBody {
                    code,
                    message: "A demo request with this email already exists".into(),
                    details: Some(json!({
                        "existingRequestId": existing_request_id,
                        "submittedAt": submitted_at,
                    })),
                },
                retry_after: None,
            },
            intake_core::Error::InvalidParams(message) => Self {
                status,
                body: ErrorBody {
                    code,
                    message,
                    details: None,
                },
                retry_after: None,
            },
            // Internal detail never reaches the client.
            intake_core::Error::Internal(_) => Self {
                status,
                body: ErrorBody {
                    code,
                    message: "An unexpected error occurred. Please try again later.".into(),
                    details: None,
                },
                retry_after: None,
            },
        }
    }
}
