//! PdfExporter - renders a document to PDF, stores it and logs the export.
//!
//! Exports within one process are serialized, so the export log's
//! read-modify-write never interleaves and sequence suffixes stay unique.

use std::sync::Arc;

use chrono::{DateTime, Local};
use thiserror::Error;
use tokio::sync::Mutex;

use super::renderer_chain::{RenderFailures, RendererChain};
use crate::domain::foundation::ErrorCode;
use crate::domain::memory::{export_filename, Document, ExportEntry, PREVIEW_CHARS};
use crate::ports::{ExportFileStorage, ExportLog, StorageError};

/// Errors from exporting a document.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Every renderer in the chain failed.
    #[error("PDF generation failed: {0}")]
    AllRenderersFailed(RenderFailures),

    /// The PDF or the export log could not be written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ExportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ExportError::AllRenderersFailed(_) => ErrorCode::RenderFailed,
            ExportError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

/// Turns documents into logged PDF files.
///
/// # Dependencies
///
/// - `ExportFileStorage`: where PDFs are written
/// - `ExportLog`: append-only log of exports
/// - `RendererChain`: HTML to PDF strategies, in order
pub struct PdfExporter {
    storage: Arc<dyn ExportFileStorage>,
    log: Arc<dyn ExportLog>,
    renderers: RendererChain,
    lock: Mutex<()>,
}

impl PdfExporter {
    pub fn new(
        storage: Arc<dyn ExportFileStorage>,
        log: Arc<dyn ExportLog>,
        renderers: RendererChain,
    ) -> Self {
        Self {
            storage,
            log,
            renderers,
            lock: Mutex::new(()),
        }
    }

    /// Exports the document stamped with the current local time.
    pub async fn export(&self, document: &Document) -> Result<ExportEntry, ExportError> {
        self.export_at(document, Local::now()).await
    }

    /// Exports the document stamped with `at`.
    pub async fn export_at(
        &self,
        document: &Document,
        at: DateTime<Local>,
    ) -> Result<ExportEntry, ExportError> {
        let _guard = self.lock.lock().await;

        let rendered = self
            .renderers
            .render(document.html())
            .await
            .map_err(ExportError::AllRenderersFailed)?;

        let filename = self.free_filename(&at).await?;
        let path = self.storage.write(&filename, &rendered.bytes).await?;

        let entry = ExportEntry::new(filename, &at, document.preview(PREVIEW_CHARS));
        self.log.append(entry.clone()).await?;

        tracing::info!(
            path = %path,
            renderer = %rendered.renderer,
            bytes = rendered.bytes.len(),
            "Exported PDF"
        );
        Ok(entry)
    }

    /// First filename for `at` not already on disk or in the log.
    async fn free_filename(&self, at: &DateTime<Local>) -> Result<String, StorageError> {
        let logged: Vec<String> = self
            .log
            .entries()
            .await?
            .into_iter()
            .map(|e| e.filename)
            .collect();

        let mut sequence = 1;
        loop {
            let candidate = export_filename(at, sequence);
            let taken = logged.contains(&candidate) || self.storage.exists(&candidate).await?;
            if !taken {
                return Ok(candidate);
            }
            sequence += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::pdf::PlainTextPdfRenderer;
    use crate::adapters::storage::{JsonExportLog, LocalExportStorage};
    use crate::domain::memory::{AnswerRecord, AssemblyOptions, DocumentAssembler};
    use crate::ports::{looks_like_pdf, PdfRenderer, RenderError};
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone};
    use tempfile::TempDir;

    struct BrokenRenderer;

    #[async_trait]
    impl PdfRenderer for BrokenRenderer {
        fn name(&self) -> &str {
            "broken"
        }

        async fn render(&self, _html: &str) -> Result<Vec<u8>, RenderError> {
            Err(RenderError::unavailable("not installed"))
        }
    }

    struct Fixture {
        dir: TempDir,
        storage: Arc<LocalExportStorage>,
        log: Arc<JsonExportLog>,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let export_dir = dir.path().join("pdf");
            Self {
                storage: Arc::new(LocalExportStorage::new(&export_dir)),
                log: Arc::new(JsonExportLog::new(export_dir.join("pdf_log.json"))),
                dir,
            }
        }

        fn exporter(&self, renderers: RendererChain) -> PdfExporter {
            PdfExporter::new(self.storage.clone(), self.log.clone(), renderers)
        }

        fn fallback_exporter(&self) -> PdfExporter {
            self.exporter(
                RendererChain::new()
                    .then(Arc::new(BrokenRenderer))
                    .then(Arc::new(PlainTextPdfRenderer::new())),
            )
        }
    }

    fn document() -> Document {
        let record = AnswerRecord::new().with("Q2", "I loved summers at the lake.");
        let options = AssemblyOptions::new(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
        DocumentAssembler::new().assemble(&record, &options)
    }

    fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 7, hour, minute, 30)
            .single()
            .unwrap()
    }

    #[tokio::test]
    async fn failing_primary_still_produces_pdf_at_expected_path() {
        let fixture = Fixture::new();

        let entry = fixture
            .fallback_exporter()
            .export_at(&document(), at(14, 5))
            .await
            .unwrap();

        assert_eq!(entry.filename, "memory_blog_20240307_1405.pdf");
        let bytes = tokio::fs::read(fixture.dir.path().join("pdf").join(&entry.filename))
            .await
            .unwrap();
        assert!(!bytes.is_empty());
        assert!(looks_like_pdf(&bytes));
    }

    #[tokio::test]
    async fn entry_carries_timestamp_and_preview() {
        let fixture = Fixture::new();
        let doc = document();

        let entry = fixture
            .fallback_exporter()
            .export_at(&doc, at(9, 0))
            .await
            .unwrap();

        assert!(entry.generated_at.starts_with("2024-03-07T09:00:30"));
        assert_eq!(entry.preview, doc.preview(PREVIEW_CHARS));
        assert!(entry.preview.chars().count() <= PREVIEW_CHARS);
        assert_eq!(fixture.log.entries().await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn same_minute_exports_get_unique_names() {
        let fixture = Fixture::new();
        let exporter = fixture.fallback_exporter();
        let doc = document();

        let mut names = Vec::new();
        for _ in 0..3 {
            names.push(exporter.export_at(&doc, at(14, 5)).await.unwrap().filename);
        }

        assert_eq!(
            names,
            vec![
                "memory_blog_20240307_1405.pdf",
                "memory_blog_20240307_1405_2.pdf",
                "memory_blog_20240307_1405_3.pdf",
            ]
        );
        let logged: Vec<String> = fixture
            .log
            .entries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.filename)
            .collect();
        assert_eq!(logged, names);
    }

    #[tokio::test]
    async fn logged_name_is_not_reused_after_file_deletion() {
        let fixture = Fixture::new();
        let exporter = fixture.fallback_exporter();

        let first = exporter.export_at(&document(), at(10, 0)).await.unwrap();
        tokio::fs::remove_file(fixture.storage.file_path(&first.filename).as_path())
            .await
            .unwrap();
        let second = exporter.export_at(&document(), at(10, 0)).await.unwrap();

        assert_eq!(second.filename, "memory_blog_20240307_1000_2.pdf");
    }

    #[tokio::test]
    async fn corrupt_log_is_replaced_by_new_entry() {
        let fixture = Fixture::new();
        tokio::fs::create_dir_all(fixture.dir.path().join("pdf")).await.unwrap();
        tokio::fs::write(fixture.log.path(), "{{{ definitely not json").await.unwrap();

        let entry = fixture
            .fallback_exporter()
            .export_at(&document(), at(11, 11))
            .await
            .unwrap();

        assert_eq!(fixture.log.entries().await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn all_renderers_failing_is_fatal_and_logs_nothing() {
        let fixture = Fixture::new();
        let exporter = fixture.exporter(RendererChain::new().then(Arc::new(BrokenRenderer)));

        let err = exporter.export_at(&document(), at(12, 0)).await.unwrap_err();

        assert!(matches!(err, ExportError::AllRenderersFailed(_)));
        assert_eq!(err.code(), ErrorCode::RenderFailed);
        assert!(fixture.log.entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn concurrent_exports_are_serialized() {
        let fixture = Fixture::new();
        let exporter = Arc::new(fixture.fallback_exporter());

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let exporter = exporter.clone();
                tokio::spawn(async move { exporter.export_at(&document(), at(8, 8)).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let mut names: Vec<String> = fixture
            .log
            .entries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.filename)
            .collect();
        assert_eq!(names.len(), 4);
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 4);
    }
}
