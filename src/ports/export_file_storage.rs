//! Export File Storage Port - the directory holding exported PDFs.

use async_trait::async_trait;
use std::path::PathBuf;

use super::StorageError;

/// Port for reading and writing exported files by name.
///
/// # Contract
///
/// Implementations must:
/// - Create the export directory on first write
/// - Write atomically (temp file + rename)
/// - Treat names as plain file names inside the export directory
#[async_trait]
pub trait ExportFileStorage: Send + Sync {
    /// Write `content` under `filename`, replacing any existing file.
    ///
    /// # Returns
    ///
    /// The path where the file was written.
    async fn write(&self, filename: &str, content: &[u8]) -> Result<FilePath, StorageError>;

    /// Read an exported file.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the file doesn't exist.
    async fn read(&self, filename: &str) -> Result<Vec<u8>, StorageError>;

    /// Check whether an exported file exists.
    async fn exists(&self, filename: &str) -> Result<bool, StorageError>;

    /// Full path an export with this name would have.
    fn file_path(&self, filename: &str) -> FilePath;
}

/// Represents a file path (absolute or relative).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePath(PathBuf);

impl FilePath {
    /// Creates a new file path from a PathBuf.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Returns the path as a string (lossy conversion for non-UTF8 paths).
    pub fn to_string_lossy(&self) -> String {
        self.0.to_string_lossy().to_string()
    }

    /// Returns a reference to the inner PathBuf.
    pub fn as_path(&self) -> &std::path::Path {
        &self.0
    }

    /// Returns the file name without the directory.
    pub fn file_name(&self) -> Option<String> {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

impl From<PathBuf> for FilePath {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}
