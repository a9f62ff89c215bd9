//! Demo request record types.
//!
//! Wire and storage shape are the same camelCase JSON object: one line per
//! record in the durable log, one element per record in list responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::validate::NormalizedSubmission;

/// Requester kind, as stored and served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Creator,
    ProjectOwner,
}

impl UserType {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::ProjectOwner => "project_owner",
        }
    }

    /// Parse client input. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "creator" => Some(Self::Creator),
            "project_owner" => Some(Self::ProjectOwner),
            _ => None,
        }
    }
}

/// Platform the social handle lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Telegram,
    X,
}

impl SocialPlatform {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Telegram => "telegram",
            Self::X => "x",
        }
    }

    /// Parse client input. Case-insensitive, surrounding whitespace ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "telegram" => Some(Self::Telegram),
            "x" => Some(Self::X),
            _ => None,
        }
    }
}

/// A stored demo request (camelCase on the wire and in the log).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoRequest {
    /// Server-assigned ID, `req_` plus 12 hex chars.
    pub request_id: String,

    /// Normalized (trimmed, lowercased) email.
    pub email: String,

    pub user_type: UserType,

    /// Normalized handle, no leading `@`.
    pub social_handle: String,

    pub social_platform: SocialPlatform,

    /// Free-text attribution. Serialized as `null` when absent.
    pub source: Option<String>,

    /// Client-claimed submission time, Unix ms. Server receipt time when
    /// the client sent none.
    pub timestamp: i64,

    pub ip_address: String,

    /// Server receipt time.
    pub created_at: DateTime<Utc>,
}

impl DemoRequest {
    /// Build a record from a validated submission.
    pub fn from_submission(
        submission: NormalizedSubmission,
        ip_address: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id: new_request_id(),
            email: submission.email,
            user_type: submission.user_type,
            social_handle: submission.social_handle,
            social_platform: submission.social_platform,
            source: submission.source,
            timestamp: submission.timestamp.unwrap_or(now.timestamp_millis()),
            ip_address: ip_address.into(),
            created_at: now,
        }
    }
}

/// Generate a request ID: `req_` plus the first 12 hex chars of a v4 UUID.
pub fn new_request_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("req_{}", &hex[..12])
}
