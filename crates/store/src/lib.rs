//! Dual-path persistence for demo requests.
//!
//! Writes land in the in-process cache first (that write cannot fail) and
//! then, best effort, in an append-only log file. Reads merge both sources;
//! on a `requestId` collision the cached record wins.

pub mod cache;
pub mod config;
pub mod log;
pub mod store;

pub use cache::*;
pub use config::*;
pub use log::*;
pub use store::*;
