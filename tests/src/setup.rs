//! Common test setup functions.

use api::{router, state::AppState};
use axum::Router;
use intake_service::{IntakeCoordinator, RateLimiter};
use intake_store::{RequestStore, StoreConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// Test context wiring the real router to a store under a temp directory.
///
/// Every context gets its own rate limiter and store, so tests do not bleed
/// quota or records into each other.
pub struct TestContext {
    /// Owns the temp directory for the test's lifetime.
    pub dir: TempDir,
    /// Where the durable log was pointed.
    pub log_path: PathBuf,
    pub store: Arc<RequestStore>,
    pub router: Router,
}

impl TestContext {
    /// Create a test context with a writable durable log.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let log_path = dir.path().join("demo-requests.txt");
        Self::build(dir, log_path)
    }

    /// Create a test context whose durable log path is a directory, so
    /// every durable write fails while the cache path keeps working.
    pub fn with_unwritable_log() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let log_path = dir.path().to_path_buf();
        Self::build(dir, log_path)
    }

    fn build(dir: TempDir, log_path: PathBuf) -> Self {
        let store = Arc::new(RequestStore::new(StoreConfig {
            path: log_path.clone(),
        }));
        let limiter = Arc::new(RateLimiter::new());
        let coordinator = Arc::new(IntakeCoordinator::new(store.clone(), limiter));
        let router = router(AppState::new(coordinator));

        Self {
            dir,
            log_path,
            store,
            router,
        }
    }

    /// Build a fresh pipeline over the same durable log, as after a process
    /// restart. Rate limiter and cache start empty; only the log carries over.
    pub fn reopen(&self) -> Router {
        let store = Arc::new(RequestStore::new(StoreConfig {
            path: self.log_path.clone(),
        }));
        let limiter = Arc::new(RateLimiter::new());
        let coordinator = Arc::new(IntakeCoordinator::new(store, limiter));
        router(AppState::new(coordinator))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
