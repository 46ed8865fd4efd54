//! ExportPdfHandler - Command handler for exporting the memory book as a PDF.

use std::sync::Arc;

use super::generate_document::{GenerateDocumentCommand, GenerateDocumentHandler};
use crate::application::{ExportError, PdfExporter};
use crate::domain::memory::ExportEntry;

/// Handler for exporting the memory document.
///
/// Generates the document with the same options a preview would use, then
/// hands it to the exporter.
pub struct ExportPdfHandler {
    generator: Arc<GenerateDocumentHandler>,
    exporter: Arc<PdfExporter>,
}

impl ExportPdfHandler {
    pub fn new(generator: Arc<GenerateDocumentHandler>, exporter: Arc<PdfExporter>) -> Self {
        Self {
            generator,
            exporter,
        }
    }

    pub async fn handle(&self, cmd: GenerateDocumentCommand) -> Result<ExportEntry, ExportError> {
        let document = self.generator.handle(cmd).await?;
        self.exporter.export(&document).await
    }
}
