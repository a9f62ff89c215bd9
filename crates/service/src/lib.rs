//! Submission pipeline for the demo intake service.
//!
//! The coordinator runs each submission through validation, admission
//! control, and duplicate suppression before handing it to the store. The
//! rate limiter and its hourly sweep live here too.

pub mod coordinator;
pub mod duplicate;
pub mod rate_limit;
pub mod sweep;

pub use coordinator::*;
pub use duplicate::*;
pub use rate_limit::*;
pub use sweep::*;
