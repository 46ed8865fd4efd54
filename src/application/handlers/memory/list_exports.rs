//! ListExportsHandler - Query handler for previously exported PDFs.

use std::sync::Arc;

use crate::domain::memory::ExportEntry;
use crate::ports::{ExportFileStorage, ExportLog, StorageError};

/// Handler for listing exports.
///
/// Returns log entries in the order they were written, skipping entries
/// whose file no longer exists or cannot be reached.
pub struct ListExportsHandler {
    log: Arc<dyn ExportLog>,
    storage: Arc<dyn ExportFileStorage>,
}

impl ListExportsHandler {
    pub fn new(log: Arc<dyn ExportLog>, storage: Arc<dyn ExportFileStorage>) -> Self {
        Self { log, storage }
    }

    pub async fn handle(&self) -> Result<Vec<ExportEntry>, StorageError> {
        let mut available = Vec::new();
        for entry in self.log.entries().await? {
            match self.storage.exists(&entry.filename).await {
                Ok(true) => available.push(entry),
                Ok(false) => {
                    tracing::debug!(filename = %entry.filename, "Skipping export with missing file");
                }
                Err(err) => {
                    tracing::warn!(filename = %entry.filename, error = %err, "Skipping unreadable export entry");
                }
            }
        }
        Ok(available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{JsonExportLog, LocalExportStorage};
    use chrono::{Local, TimeZone};
    use tempfile::TempDir;

    fn entry(name: &str) -> ExportEntry {
        let at = Local.with_ymd_and_hms(2024, 3, 7, 14, 5, 0).single().unwrap();
        ExportEntry::new(name, &at, "Family Memories")
    }

    #[tokio::test]
    async fn lists_in_log_order_and_skips_missing_files() {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(LocalExportStorage::new(dir.path()));
        let log = Arc::new(JsonExportLog::new(dir.path().join("pdf_log.json")));
        for name in ["b.pdf", "gone.pdf", "a.pdf"] {
            log.append(entry(name)).await.unwrap();
        }
        storage.write("a.pdf", b"%PDF-a").await.unwrap();
        storage.write("b.pdf", b"%PDF-b").await.unwrap();

        let listed = ListExportsHandler::new(log, storage).handle().await.unwrap();

        let names: Vec<&str> = listed.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["b.pdf", "a.pdf"]);
    }

    #[tokio::test]
    async fn entries_with_unusable_names_are_skipped() {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(LocalExportStorage::new(dir.path()));
        let log = Arc::new(JsonExportLog::new(dir.path().join("pdf_log.json")));
        for name in ["", "../outside.pdf", "sub/x.pdf", "memory_blog_20240307_1405.pdf"] {
            log.append(entry(name)).await.unwrap();
        }
        storage
            .write("memory_blog_20240307_1405.pdf", b"%PDF-1.4")
            .await
            .unwrap();

        let listed = ListExportsHandler::new(log, storage).handle().await.unwrap();

        let names: Vec<&str> = listed.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["memory_blog_20240307_1405.pdf"]);
    }

    #[tokio::test]
    async fn missing_log_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let handler = ListExportsHandler::new(
            Arc::new(JsonExportLog::new(dir.path().join("pdf_log.json"))),
            Arc::new(LocalExportStorage::new(dir.path())),
        );

        assert!(handler.handle().await.unwrap().is_empty());
    }
}
