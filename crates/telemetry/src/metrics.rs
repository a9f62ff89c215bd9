//! Internal metrics collection.
//!
//! Collected in-memory and logged once per sweep interval; nothing leaves
//! the process.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// A gauge metric (can go up or down).
#[derive(Debug, Default)]
pub struct Gauge(AtomicU64);

impl Gauge {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn set(&self, val: u64) {
        self.0.store(val, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Histogram for latency tracking.
#[derive(Debug)]
pub struct Histogram {
    /// Buckets: 1ms, 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 5s, 10s
    buckets: [AtomicU64; 11],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    const BUCKET_BOUNDS: [u64; 11] = [1, 5, 10, 25, 50, 100, 250, 500, 1000, 5000, 10000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in milliseconds.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        for (i, &bound) in Self::BUCKET_BOUNDS.iter().enumerate() {
            if ms <= bound {
                self.buckets[i].fetch_add(1, Ordering::Relaxed);
                return;
            }
        }
        // Value exceeds all buckets, add to last
        self.buckets[10].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum() as f64 / count as f64
        }
    }
}

/// Collected metrics for the intake service.
#[derive(Debug, Default)]
pub struct Metrics {
    // Submission pipeline
    pub submissions_received: Counter,
    pub submissions_accepted: Counter,
    pub rejected_validation: Counter,
    pub rejected_rate_limit: Counter,
    pub rejected_duplicate: Counter,

    // Persistence
    pub durable_writes: Counter,
    pub degraded_writes: Counter,

    // Read path
    pub list_requests: Counter,

    // Latency histograms
    pub submit_latency_ms: Histogram,
    pub list_latency_ms: Histogram,

    // Gauges, refreshed by the sweep
    pub rate_limit_ip_keys: Gauge,
    pub rate_limit_email_keys: Gauge,
    pub cached_records: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            submissions_received: self.submissions_received.get(),
            submissions_accepted: self.submissions_accepted.get(),
            rejected_validation: self.rejected_validation.get(),
            rejected_rate_limit: self.rejected_rate_limit.get(),
            rejected_duplicate: self.rejected_duplicate.get(),
            durable_writes: self.durable_writes.get(),
            degraded_writes: self.degraded_writes.get(),
            list_requests: self.list_requests.get(),
            submit_latency_mean_ms: self.submit_latency_ms.mean(),
            list_latency_mean_ms: self.list_latency_ms.mean(),
            rate_limit_ip_keys: self.rate_limit_ip_keys.get(),
            rate_limit_email_keys: self.rate_limit_email_keys.get(),
            cached_records: self.cached_records.get(),
        }
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub submissions_received: u64,
    pub submissions_accepted: u64,
    pub rejected_validation: u64,
    pub rejected_rate_limit: u64,
    pub rejected_duplicate: u64,
    pub durable_writes: u64,
    pub degraded_writes: u64,
    pub list_requests: u64,
    pub submit_latency_mean_ms: f64,
    pub list_latency_mean_ms: f64,
    pub rate_limit_ip_keys: u64,
    pub rate_limit_email_keys: u64,
    pub cached_records: u64,
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
