//! Integration test support for the demo intake service.

pub mod fixtures;
pub mod setup;
