//! Sliding-window admission control.
//!
//! Tracks raw submission timestamps per client address and per normalized
//! email. Limits are evaluated in fixed order (IP/hour, IP/day, email/day)
//! and the first violation wins. A passing check charges both keys at once;
//! a failing check charges nothing.
//!
//! Callers pass `now` explicitly so policy can be tested against a fixed
//! clock. The hourly sweep takes the same lock as checks, so it can never
//! observe or drop a timestamp mid-append.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use intake_core::limits::{
    DAY_WINDOW_SECS, EMAIL_DAILY_LIMIT, HOUR_WINDOW_SECS, IP_DAILY_LIMIT, IP_HOURLY_LIMIT,
};
use intake_core::{LimitScope, LimitWindow};
use parking_lot::Mutex;
use tracing::debug;

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Limited {
        scope: LimitScope,
        window: LimitWindow,
        retry_after_secs: u64,
    },
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

#[derive(Debug, Default)]
struct Windows {
    ip: HashMap<String, Vec<DateTime<Utc>>>,
    email: HashMap<String, Vec<DateTime<Utc>>>,
}

/// Sliding-window limiter keyed by client address and normalized email.
#[derive(Debug, Default)]
pub struct RateLimiter {
    windows: Mutex<Windows>,
}

/// Shared limiter handle.
pub type SharedRateLimiter = Arc<RateLimiter>;

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check one submission attempt and, if allowed, record it.
    ///
    /// Timestamps older than a day are pruned from the touched keys on the
    /// way through; they can never affect either window.
    pub fn check(&self, ip: &str, email: &str, now: DateTime<Utc>) -> Verdict {
        let hour = Duration::seconds(HOUR_WINDOW_SECS as i64);
        let day = Duration::seconds(DAY_WINDOW_SECS as i64);

        let mut guard = self.windows.lock();
        let windows = &mut *guard;

        let ip_window = windows.ip.entry(ip.to_string()).or_default();
        ip_window.retain(|&t| now - t < day);

        let ip_last_hour = ip_window.iter().filter(|&&t| now - t < hour).count();
        if ip_last_hour >= IP_HOURLY_LIMIT {
            return Verdict::Limited {
                scope: LimitScope::Ip,
                window: LimitWindow::Hour,
                retry_after_secs: HOUR_WINDOW_SECS,
            };
        }
        if ip_window.len() >= IP_DAILY_LIMIT {
            return Verdict::Limited {
                scope: LimitScope::Ip,
                window: LimitWindow::Day,
                retry_after_secs: DAY_WINDOW_SECS,
            };
        }

        let email_window = windows.email.entry(email.to_string()).or_default();
        email_window.retain(|&t| now - t < day);
        if email_window.len() >= EMAIL_DAILY_LIMIT {
            return Verdict::Limited {
                scope: LimitScope::Email,
                window: LimitWindow::Day,
                retry_after_secs: DAY_WINDOW_SECS,
            };
        }

        ip_window.push(now);
        email_window.push(now);
        Verdict::Allowed
    }

    /// Prune timestamps older than a day everywhere and drop empty windows.
    ///
    /// Returns the surviving (ip, email) key counts.
    pub fn sweep(&self, now: DateTime<Utc>) -> (usize, usize) {
        let day = Duration::seconds(DAY_WINDOW_SECS as i64);

        let mut guard = self.windows.lock();
        let windows = &mut *guard;

        for map in [&mut windows.ip, &mut windows.email] {
            map.retain(|_, times| {
                times.retain(|&t| now - t < day);
                !times.is_empty()
            });
        }

        let counts = (windows.ip.len(), windows.email.len());
        debug!(ip_keys = counts.0, email_keys = counts.1, "Swept rate-limit windows");
        counts
    }
}
