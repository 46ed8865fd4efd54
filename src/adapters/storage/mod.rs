//! Storage Adapters
//!
//! File-backed implementations of the storage ports.
//!
//! ## Available Adapters
//!
//! - **JsonAnswerStore** - Answer record as a flat JSON object
//! - **JsonExportLog** - Export log as a JSON array
//! - **LocalExportStorage** - Exported PDFs in one directory
//! - **LocalAudioStore** - The single narration audio file
//!
//! All writes go through a temp file and a rename.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{JsonAnswerStore, JsonExportLog};
//!
//! let answers = JsonAnswerStore::new("data/memories.json");
//! let log = JsonExportLog::new("pdf/pdf_log.json");
//! ```

mod atomic;
mod json_answer_store;
mod json_export_log;
mod local_audio_store;
mod local_export_storage;

pub use json_answer_store::JsonAnswerStore;
pub use json_export_log::JsonExportLog;
pub use local_audio_store::LocalAudioStore;
pub use local_export_storage::LocalExportStorage;
