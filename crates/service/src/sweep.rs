//! Background sweep for the rate limiter.
//!
//! Expired timestamps are already dropped lazily on each check; the sweep
//! exists so keys for callers that never return do not accumulate forever.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use telemetry::metrics;
use tokio::time::interval;
use tracing::{debug, info};

use crate::rate_limit::SharedRateLimiter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Seconds between sweeps.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    3600
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// Spawn the periodic sweep task.
pub fn start_sweep(limiter: SharedRateLimiter, config: SweepConfig) -> tokio::task::JoinHandle<()> {
    info!(interval_secs = config.interval_secs, "Starting rate limit sweep task");

    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(config.interval_secs));
        // The first tick fires immediately; skip it so the first sweep comes
        // one full period after boot.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let (ip_keys, email_keys) = limiter.sweep(Utc::now());
            metrics().rate_limit_ip_keys.set(ip_keys as u64);
            metrics().rate_limit_email_keys.set(email_keys as u64);
            debug!(ip_keys, email_keys, "Rate limit sweep complete");

            let snapshot = metrics().snapshot();
            info!(
                received = snapshot.submissions_received,
                accepted = snapshot.submissions_accepted,
                rejected_validation = snapshot.rejected_validation,
                rejected_rate_limit = snapshot.rejected_rate_limit,
                rejected_duplicate = snapshot.rejected_duplicate,
                degraded_writes = snapshot.degraded_writes,
                "Intake stats"
            );
        }
    })
}
