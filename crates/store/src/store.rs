//! Merged store over the durable log and the in-process cache.

use std::collections::HashMap;

use intake_core::DemoRequest;
use telemetry::{health, metrics};
use tracing::{debug, info, warn};

use crate::cache::MemoryCache;
use crate::config::StoreConfig;
use crate::log::DurableLog;

/// Where an accepted record ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Cache and durable log.
    Durable,
    /// Cache only; the durable write failed and was swallowed.
    MemoryOnly { reason: String },
}

/// Dual-path request store.
pub struct RequestStore {
    log: DurableLog,
    cache: MemoryCache,
}

impl RequestStore {
    pub fn new(config: StoreConfig) -> Self {
        info!(path = %config.path.display(), "Request store opened");
        Self {
            log: DurableLog::new(config.path),
            cache: MemoryCache::new(),
        }
    }

    /// Persist a record: cache first (cannot fail), then the log.
    ///
    /// A durable-write failure is downgraded to a health/metrics event and
    /// never surfaces to the submitter; their record is already cached.
    pub async fn append(&self, record: DemoRequest) -> WriteOutcome {
        self.cache.push(record.clone());
        metrics().cached_records.set(self.cache.len() as u64);

        match self.log.append(&record).await {
            Ok(()) => {
                metrics().durable_writes.inc();
                health().durable_log.set_healthy();
                debug!(request_id = %record.request_id, "Record written to durable log");
                WriteOutcome::Durable
            }
            Err(e) => {
                metrics().degraded_writes.inc();
                health().durable_log.set_unhealthy(e.to_string());
                warn!(
                    request_id = %record.request_id,
                    error = %e,
                    "Durable write failed, record kept in memory only"
                );
                WriteOutcome::MemoryOnly {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Merged view of log and cache, deduplicated by `requestId`.
    ///
    /// File records come first, cache records after; on an ID collision the
    /// cached record replaces the file one in place. No ordering guarantee
    /// beyond that; callers sort.
    pub async fn list_all(&self) -> Vec<DemoRequest> {
        let file_records = self.log.read_all().await;
        let cached = self.cache.snapshot();
        let (from_file, from_cache) = (file_records.len(), cached.len());

        let mut merged: Vec<DemoRequest> = Vec::with_capacity(from_file + from_cache);
        let mut index: HashMap<String, usize> = HashMap::new();

        for record in file_records.into_iter().chain(cached) {
            match index.get(&record.request_id) {
                Some(&i) => merged[i] = record,
                None => {
                    index.insert(record.request_id.clone(), merged.len());
                    merged.push(record);
                }
            }
        }

        debug!(
            total = merged.len(),
            from_file, from_cache, "Merged request view"
        );

        merged
    }

    /// Records accepted by this process instance.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}
