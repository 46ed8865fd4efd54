//! Memory command and query handlers.
//!
//! One handler per use case. Handlers own `Arc`s of the ports they need and
//! are built once at startup.

mod export_pdf;
mod generate_document;
mod get_export;
mod list_exports;
mod load_answers;
mod read_aloud;
mod save_answers;

pub use export_pdf::ExportPdfHandler;
pub use generate_document::{GenerateDocumentCommand, GenerateDocumentHandler};
pub use get_export::{GetExportError, GetExportHandler};
pub use list_exports::ListExportsHandler;
pub use load_answers::LoadAnswersHandler;
pub use read_aloud::{ReadAloudError, ReadAloudHandler};
pub use save_answers::{SaveAnswersCommand, SaveAnswersError, SaveAnswersHandler};
