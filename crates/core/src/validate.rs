//! Submission validation and normalization.
//!
//! Bodies arrive as weakly-typed JSON from a public form, so every field is
//! checked independently and failures accumulate: the client sees all
//! problems in one round trip. Each field yields at most one error, the
//! presence check first and the format check only once presence holds.
//!
//! Absent, `null`, and empty-string values all count as "missing" to match
//! what browsers actually send.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::FieldError;
use crate::limits::{
    EMAIL_PATTERN, HANDLE_PATTERN, MAX_EMAIL_LEN, MAX_HANDLE_LEN, MAX_SOURCE_LEN, MIN_HANDLE_LEN,
};
use crate::request::{SocialPlatform, UserType};

/// Compiled email regex (lazy initialization).
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("invalid email pattern"));

/// Compiled handle regex (lazy initialization).
static HANDLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HANDLE_PATTERN).expect("invalid handle pattern"));

/// A submission with every field in canonical form, ready for admission
/// control. `requestId`/`createdAt` are assigned later, at persist time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedSubmission {
    /// Trimmed, lowercased.
    pub email: String,
    pub user_type: UserType,
    /// Leading `@`s stripped, then trimmed.
    pub social_handle: String,
    pub social_platform: SocialPlatform,
    /// `None` when absent, `null`, or empty.
    pub source: Option<String>,
    /// Client epoch-millis hint. `None` when absent or non-numeric.
    pub timestamp: Option<i64>,
}

/// Validate a raw JSON body and normalize it.
///
/// Returns every field failure at once, in fixed field order.
pub fn validate_submission(body: &Value) -> Result<NormalizedSubmission, Vec<FieldError>> {
    let email = parse_email(body);
    let user_type = parse_user_type(body);
    let social_handle = parse_social_handle(body);
    let social_platform = parse_social_platform(body);
    let source = parse_source(body);

    match (email, user_type, social_handle, social_platform, source) {
        (Ok(email), Ok(user_type), Ok(social_handle), Ok(social_platform), Ok(source)) => {
            Ok(NormalizedSubmission {
                email,
                user_type,
                social_handle,
                social_platform,
                source,
                timestamp: body.get("timestamp").and_then(Value::as_i64),
            })
        }
        (email, user_type, social_handle, social_platform, source) => {
            let mut errors = Vec::new();
            errors.extend(email.err());
            errors.extend(user_type.err());
            errors.extend(social_handle.err());
            errors.extend(social_platform.err());
            errors.extend(source.err());
            Err(errors)
        }
    }
}

fn parse_email(body: &Value) -> Result<String, FieldError> {
    let Some(value) = field(body, "email") else {
        return Err(FieldError::new("email", "Email is required"));
    };
    match value.as_str() {
        Some(raw) if is_valid_email(raw) => Ok(normalize_email(raw)),
        _ => Err(FieldError::new("email", "Invalid email format")),
    }
}

fn parse_user_type(body: &Value) -> Result<UserType, FieldError> {
    let Some(value) = field(body, "userType") else {
        return Err(FieldError::new("userType", "User type is required"));
    };
    value.as_str().and_then(UserType::parse).ok_or_else(|| {
        FieldError::new(
            "userType",
            "User type must be either \"creator\" or \"project_owner\"",
        )
    })
}

fn parse_social_handle(body: &Value) -> Result<String, FieldError> {
    let Some(value) = field(body, "socialHandle") else {
        return Err(FieldError::new("socialHandle", "Social handle is required"));
    };
    let invalid = || {
        FieldError::new(
            "socialHandle",
            "Social handle must be 3-50 characters, alphanumeric with underscores and hyphens",
        )
    };
    let Some(raw) = value.as_str() else {
        return Err(invalid());
    };
    let cleaned = normalize_handle(raw);
    if is_valid_handle(&cleaned) {
        Ok(cleaned)
    } else {
        Err(invalid())
    }
}

fn parse_social_platform(body: &Value) -> Result<SocialPlatform, FieldError> {
    let Some(value) = field(body, "socialPlatform") else {
        return Err(FieldError::new(
            "socialPlatform",
            "Social platform is required",
        ));
    };
    value.as_str().and_then(SocialPlatform::parse).ok_or_else(|| {
        FieldError::new(
            "socialPlatform",
            "Social platform must be either \"telegram\" or \"x\"",
        )
    })
}

fn parse_source(body: &Value) -> Result<Option<String>, FieldError> {
    let Some(value) = field(body, "source") else {
        return Ok(None);
    };
    match value.as_str() {
        Some(raw) if raw.chars().count() <= MAX_SOURCE_LEN => Ok(Some(raw.to_string())),
        Some(_) => Err(FieldError::new(
            "source",
            "Source must be maximum 100 characters",
        )),
        None => Err(FieldError::new("source", "Source must be a string")),
    }
}

/// Canonical email form: trimmed, lowercased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Canonical handle form: leading `@`s stripped, THEN trimmed.
/// Order matters: `" @user"` stays `"@user"` and fails the charset check.
pub fn normalize_handle(raw: &str) -> String {
    raw.trim_start_matches('@').trim().to_string()
}

fn is_valid_email(raw: &str) -> bool {
    let trimmed = raw.trim();
    EMAIL_REGEX.is_match(trimmed) && trimmed.chars().count() <= MAX_EMAIL_LEN
}

fn is_valid_handle(cleaned: &str) -> bool {
    let len = cleaned.chars().count();
    if len < MIN_HANDLE_LEN || len > MAX_HANDLE_LEN {
        return false;
    }
    if !HANDLE_REGEX.is_match(cleaned) {
        return false;
    }
    !(cleaned.starts_with('-')
        || cleaned.starts_with('_')
        || cleaned.ends_with('-')
        || cleaned.ends_with('_'))
}

/// A field counts as present only when it is a non-null, non-empty-string
/// value. Browsers send empty inputs as `""`, which means "missing" here.
fn field<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    match body.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value),
    }
}
