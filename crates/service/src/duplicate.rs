//! Duplicate suppression.
//!
//! A submission is a duplicate when any record in the merged store view has
//! the same normalized email and a `createdAt` inside the trailing 30 days.
//! Stored emails are re-normalized before comparing; log lines written by
//! older deployments may predate normalization.

use chrono::{DateTime, Duration, Utc};
use intake_core::limits::DUPLICATE_WINDOW_DAYS;
use intake_core::{normalize_email, DemoRequest};

/// Find the first prior submission for `normalized_email` inside the
/// suppression window, if any.
pub fn find_duplicate<'a>(
    records: &'a [DemoRequest],
    normalized_email: &str,
    now: DateTime<Utc>,
) -> Option<&'a DemoRequest> {
    let cutoff = now - Duration::days(DUPLICATE_WINDOW_DAYS);
    records
        .iter()
        .find(|r| normalize_email(&r.email) == normalized_email && r.created_at > cutoff)
}
