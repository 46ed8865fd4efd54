//! JSON Export Log - Implementation of ExportLog as one JSON array file.
//!
//! Every append reads the whole array and rewrites it atomically. Callers in
//! the same process serialize appends; across processes the log is
//! last-writer-wins.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::atomic::write_atomic;
use super::json_answer_store::to_pretty_json;
use crate::domain::memory::ExportEntry;
use crate::ports::{ExportLog, StorageError};

#[derive(Debug, Clone)]
pub struct JsonExportLog {
    path: PathBuf,
}

impl JsonExportLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ExportLog for JsonExportLog {
    async fn entries(&self) -> Result<Vec<ExportEntry>, StorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::from_io(&self.path, "read", e)),
        };

        match serde_json::from_slice::<Vec<ExportEntry>>(&bytes) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Export log is corrupt, treating it as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn append(&self, entry: ExportEntry) -> Result<(), StorageError> {
        let mut entries = self.entries().await?;
        entries.push(entry);

        let json = to_pretty_json(&entries)?;
        write_atomic(&self.path, &json).await
    }
}
