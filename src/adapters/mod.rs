//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Generative text providers (OpenAI, Anthropic, failover, mock)
//! - `http` - REST API (axum)
//! - `pdf` - HTML to PDF renderers
//! - `speech` - Text-to-speech providers
//! - `storage` - JSON and file storage on the local disk

pub mod ai;
pub mod http;
pub mod pdf;
pub mod speech;
pub mod storage;
