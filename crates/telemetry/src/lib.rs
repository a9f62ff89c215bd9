//! Internal telemetry for the demo intake service.
//!
//! Counters and health state live in-process and surface through the
//! periodic sweep log line and the health endpoint; there is no external
//! metrics backend.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
