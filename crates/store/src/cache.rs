//! In-process record cache.
//!
//! Authoritative for the life of the process: a record accepted while this
//! instance runs is always present here, whatever became of the durable
//! write.

use intake_core::DemoRequest;
use parking_lot::RwLock;

/// Append-only in-memory record list.
#[derive(Debug, Default)]
pub struct MemoryCache {
    records: RwLock<Vec<DemoRequest>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record. Infallible.
    pub fn push(&self, record: DemoRequest) {
        self.records.write().push(record);
    }

    /// Clone out the current contents, in insertion order.
    pub fn snapshot(&self) -> Vec<DemoRequest> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
