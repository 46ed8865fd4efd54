//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod memory;

pub use memory::{
    // Commands
    GenerateDocumentCommand, SaveAnswersCommand,
    // Handlers
    ExportPdfHandler, GenerateDocumentHandler, GetExportHandler, ListExportsHandler,
    LoadAnswersHandler, ReadAloudHandler, SaveAnswersHandler,
    // Errors
    GetExportError, ReadAloudError, SaveAnswersError,
};
