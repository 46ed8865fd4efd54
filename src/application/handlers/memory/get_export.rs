//! GetExportHandler - Query handler for downloading one exported PDF.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::memory::validate_export_filename;
use crate::ports::{ExportFileStorage, StorageError};

#[derive(Debug, Clone, Error)]
pub enum GetExportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Export not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Storage(StorageError),
}

impl GetExportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            GetExportError::Validation(_) => ErrorCode::ValidationFailed,
            GetExportError::NotFound(_) => ErrorCode::ExportNotFound,
            GetExportError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

pub struct GetExportHandler {
    storage: Arc<dyn ExportFileStorage>,
}

impl GetExportHandler {
    pub fn new(storage: Arc<dyn ExportFileStorage>) -> Self {
        Self { storage }
    }

    pub async fn handle(&self, filename: &str) -> Result<Vec<u8>, GetExportError> {
        validate_export_filename(filename)?;
        self.storage.read(filename).await.map_err(|err| match err {
            StorageError::NotFound { .. } => GetExportError::NotFound(filename.to_string()),
            other => GetExportError::Storage(other),
        })
    }
}
