//! Core types, validation, and policy limits for the demo request intake service.

pub mod error;
pub mod limits;
pub mod request;
pub mod validate;

pub use error::{Error, FieldError, LimitScope, LimitWindow, Result};
pub use request::*;
pub use validate::*;
