//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `AnswerStore` - Persisted answer record with corrupt-file recovery
//! - `ExportLog` - Append-only log of PDF exports
//! - `ExportFileStorage` - Directory of exported PDFs
//! - `AudioStore` - The single narration audio file
//!
//! ## Provider Ports
//!
//! - `AIProvider` - Chat completion used to polish answers
//! - `PdfRenderer` - One HTML to PDF strategy in the renderer chain
//! - `SpeechSynthesizer` - Text-to-speech

mod ai_provider;
mod answer_store;
mod export_file_storage;
mod export_log;
mod pdf_renderer;
mod speech_synthesizer;
mod storage_error;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use answer_store::{AnswerStore, LoadOutcome};
pub use export_file_storage::{ExportFileStorage, FilePath};
pub use export_log::ExportLog;
pub use pdf_renderer::{looks_like_pdf, PdfRenderer, RenderError};
pub use speech_synthesizer::{AudioClip, AudioStore, SpeechError, SpeechSynthesizer};
pub use storage_error::StorageError;
