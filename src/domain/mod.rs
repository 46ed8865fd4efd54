//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared error vocabulary
//! - `memory` - Prompts, answer records, document assembly and export naming

pub mod foundation;
pub mod memory;
