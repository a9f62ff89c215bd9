//! Application state shared across handlers.

use intake_service::IntakeCoordinator;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Submission pipeline coordinator
    pub coordinator: Arc<IntakeCoordinator>,
}

impl AppState {
    pub fn new(coordinator: Arc<IntakeCoordinator>) -> Self {
        Self { coordinator }
    }
}
