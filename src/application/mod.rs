//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers are split into commands (save, export, read aloud) and queries
//! (load, generate, list, download).

pub mod handlers;
mod pdf_exporter;
mod renderer_chain;
mod story_polisher;

pub use handlers::{
    ExportPdfHandler, GenerateDocumentCommand, GenerateDocumentHandler, GetExportError,
    GetExportHandler, ListExportsHandler, LoadAnswersHandler, ReadAloudError, ReadAloudHandler,
    SaveAnswersCommand, SaveAnswersError, SaveAnswersHandler,
};
pub use pdf_exporter::{ExportError, PdfExporter};
pub use renderer_chain::{RenderFailures, RenderedPdf, RendererChain};
pub use story_polisher::{polish_instruction, StoryPolisher};
