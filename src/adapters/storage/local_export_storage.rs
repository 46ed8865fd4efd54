//! Local Export Storage - Implementation of ExportFileStorage on the filesystem.
//!
//! # Atomic Writes
//!
//! Uses a write-to-temp-then-rename pattern so a reader never sees a partially
//! written PDF.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::atomic::write_atomic;
use crate::ports::{ExportFileStorage, FilePath, StorageError};

/// Exported PDFs stored flat in one directory.
#[derive(Debug, Clone)]
pub struct LocalExportStorage {
    export_dir: PathBuf,
}

impl LocalExportStorage {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf, StorageError> {
        let is_plain_name = Path::new(filename)
            .file_name()
            .map(|n| n == filename)
            .unwrap_or(false);
        if !is_plain_name {
            return Err(StorageError::io(format!(
                "Refusing path outside the export directory: {}",
                filename
            )));
        }
        Ok(self.export_dir.join(filename))
    }
}

#[async_trait]
impl ExportFileStorage for LocalExportStorage {
    async fn write(&self, filename: &str, content: &[u8]) -> Result<FilePath, StorageError> {
        let path = self.path_for(filename)?;
        write_atomic(&path, content).await?;
        Ok(FilePath::new(path))
    }

    async fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path_for(filename)?;
        fs::read(&path)
            .await
            .map_err(|e| StorageError::from_io(&path, "read", e))
    }

    async fn exists(&self, filename: &str) -> Result<bool, StorageError> {
        let path = self.path_for(filename)?;
        match fs::metadata(&path).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::from_io(&path, "inspect", e)),
        }
    }

    fn file_path(&self, filename: &str) -> FilePath {
        FilePath::new(self.export_dir.join(filename))
    }
}
