//! JSON Answer Store - Implementation of AnswerStore backed by one JSON file.
//!
//! The file is a flat JSON object mapping prompt to answer, pretty-printed
//! with 4-space indentation:
//!
//! ```text
//! {
//!     "What is your favorite childhood memory?": "Summers at the lake.",
//!     "Who was your best friend growing up?": ""
//! }
//! ```

use async_trait::async_trait;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::atomic::write_atomic;
use crate::domain::memory::AnswerRecord;
use crate::ports::{AnswerStore, LoadOutcome, StorageError};

/// Answer store persisting the record to a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonAnswerStore {
    path: PathBuf,
}

impl JsonAnswerStore {
    /// Creates a store for the given file path. Nothing is touched until the
    /// first load or save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serializes a value as JSON indented by four spaces.
pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, StorageError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| StorageError::serialization(e.to_string()))?;
    Ok(buf)
}

#[async_trait]
impl AnswerStore for JsonAnswerStore {
    async fn load(&self) -> Result<LoadOutcome, StorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No saved answers yet");
                return Ok(LoadOutcome::Loaded(AnswerRecord::new()));
            }
            Err(e) => return Err(StorageError::from_io(&self.path, "read", e)),
        };

        match serde_json::from_slice::<AnswerRecord>(&bytes) {
            Ok(record) => Ok(LoadOutcome::Loaded(record)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Saved answers are not valid JSON, starting from an empty record"
                );
                Ok(LoadOutcome::Recovered {
                    record: AnswerRecord::new(),
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn save(&self, record: &AnswerRecord) -> Result<(), StorageError> {
        let json = to_pretty_json(record)?;
        write_atomic(&self.path, &json).await?;
        tracing::debug!(
            path = %self.path.display(),
            answered = record.answered_count(),
            "Saved answers"
        );
        Ok(())
    }
}
