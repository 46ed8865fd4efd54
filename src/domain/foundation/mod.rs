//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary shared by the memory domain.

mod errors;

pub use errors::{ErrorCode, ValidationError};
