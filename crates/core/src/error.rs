//! Unified error types for the intake pipeline.
//!
//! Client-visible error codes:
//! - VALIDATION_ERROR: field-level input problems (400)
//! - RATE_LIMIT_EXCEEDED: admission control tripped (429)
//! - DUPLICATE_REQUEST: repeat email within the suppression window (409)
//! - INVALID_PARAMETERS: bad pagination query (400)
//! - INTERNAL_ERROR: anything unanticipated (500)
//!
//! Durable-log write failures are deliberately NOT represented here: the
//! in-process cache write already succeeded, so the caller's request did too.
//! See `WriteOutcome` in `intake-store`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// A single field-level validation failure, in wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Which key tripped the rate limiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitScope {
    Ip,
    Email,
}

impl LimitScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::Email => "email",
        }
    }
}

impl std::fmt::Display for LimitScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which trailing window the tripped limit counts over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitWindow {
    Hour,
    Day,
}

impl LimitWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }
}

impl std::fmt::Display for LimitWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type for the intake pipeline.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// One or more fields failed validation. Always non-empty.
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Admission control rejected the attempt.
    #[error("rate limited ({scope}/{window}, retry after {retry_after_secs}s)")]
    RateLimited {
        scope: LimitScope,
        window: LimitWindow,
        retry_after_secs: u64,
    },

    /// A prior submission from the same email is still inside the window.
    #[error("duplicate of request {existing_request_id}")]
    Duplicate {
        existing_request_id: String,
        submitted_at: DateTime<Utc>,
    },

    /// Bad pagination parameters on the list endpoint.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Anything unanticipated; details stay server-side.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn validation(errors: Vec<FieldError>) -> Self {
        Self::Validation(errors)
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the client-visible error code.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::RateLimited { .. } => "RATE_LIMIT_EXCEEDED",
            Self::Duplicate { .. } => "DUPLICATE_REQUEST",
            Self::InvalidParams(_) => "INVALID_PARAMETERS",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::RateLimited { .. } => 429,
            Self::Duplicate { .. } => 409,
            Self::InvalidParams(_) => 400,
            Self::Internal(_) => 500,
        }
    }
}
