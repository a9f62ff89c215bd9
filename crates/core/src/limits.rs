//! Field and admission-policy limits for the intake endpoint.
//!
//! The endpoint is public and unauthenticated, so every knob here exists to
//! bound abuse: field lengths cap payload size, the admission thresholds cap
//! submission volume per client, and the duplicate window suppresses repeat
//! signups from the same address.

// === Field Limits ===

/// Email shape: single `@`, no whitespace anywhere, dot in the domain.
/// Deliberately loose; the contact flow is the real verification.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Handle charset after `@`-stripping.
pub const HANDLE_PATTERN: &str = r"^[A-Za-z0-9_-]+$";

/// Email max length after trimming (RFC 5321 path limit).
pub const MAX_EMAIL_LEN: usize = 255;

/// Social handle minimum length after `@`-stripping.
pub const MIN_HANDLE_LEN: usize = 3;

/// Social handle maximum length after `@`-stripping.
pub const MAX_HANDLE_LEN: usize = 50;

/// Optional source tag max length.
pub const MAX_SOURCE_LEN: usize = 100;

// === Admission Policy ===

/// Submissions allowed per client address within a trailing hour.
pub const IP_HOURLY_LIMIT: usize = 10;

/// Submissions allowed per client address within a trailing day.
pub const IP_DAILY_LIMIT: usize = 50;

/// Submissions allowed per normalized email within a trailing day.
pub const EMAIL_DAILY_LIMIT: usize = 3;

/// Trailing-hour window in seconds.
pub const HOUR_WINDOW_SECS: u64 = 3600;

/// Trailing-day window in seconds. Also the retention horizon for
/// rate-limit timestamps: nothing older can affect any check.
pub const DAY_WINDOW_SECS: u64 = 86_400;

// === Duplicate Suppression ===

/// Days during which a repeat submission from the same email is rejected.
pub const DUPLICATE_WINDOW_DAYS: i64 = 30;

// === Listing ===

/// Page size used when the query string does not supply one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Largest page size the list endpoint will serve.
pub const MAX_PAGE_SIZE: i64 = 100;
