//! Atomic file replacement shared by the local storage adapters.
//!
//! Content goes to a uniquely named sibling temp file, is synced to disk, then
//! renamed over the target. Readers see either the old file or the new one.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::StorageError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes `content` to `path` atomically, creating parent directories.
pub(crate) async fn write_atomic(path: &Path, content: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent).await?;
    }

    let temp_path = temp_path_for(path);
    if let Err(err) = write_and_sync(&temp_path, content).await {
        remove_temp(&temp_path).await;
        return Err(err);
    }

    if let Err(e) = fs::rename(&temp_path, path).await {
        remove_temp(&temp_path).await;
        return Err(StorageError::io(format!(
            "Failed to rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )));
    }

    Ok(())
}

/// Creates a directory and all its parents.
pub(crate) async fn ensure_dir(dir: &Path) -> Result<(), StorageError> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| StorageError::from_io(dir, "create directory", e))
}

/// Best-effort cleanup after a failed write. The original error is what the
/// caller sees.
async fn remove_temp(temp_path: &Path) {
    if let Err(e) = fs::remove_file(temp_path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::debug!(path = %temp_path.display(), error = %e, "Could not remove temp file");
        }
    }
}

async fn write_and_sync(temp_path: &Path, content: &[u8]) -> Result<(), StorageError> {
    let mut file = fs::File::create(temp_path)
        .await
        .map_err(|e| StorageError::from_io(temp_path, "create temp file", e))?;

    file.write_all(content)
        .await
        .map_err(|e| StorageError::from_io(temp_path, "write temp file", e))?;

    file.sync_all()
        .await
        .map_err(|e| StorageError::from_io(temp_path, "sync temp file", e))
}

/// `dir/name.ext` -> `dir/.name.ext.<pid>.<n>.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(".{}.{}.{}.tmp", name, std::process::id(), n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_content_and_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/file.bin");

        write_atomic(&path, b"hello").await.unwrap();

        assert_eq!(fs::read(&path).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");

        write_atomic(&path, b"first").await.unwrap();
        write_atomic(&path, b"second").await.unwrap();

        assert_eq!(fs::read_to_string(&path).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn leaves_no_temp_files_behind() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("file.txt");

        write_atomic(&path, b"content").await.unwrap();

        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        assert_eq!(names, vec!["file.txt".to_string()]);
    }

    #[tokio::test]
    async fn failed_rename_cleans_up_temp_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).await.unwrap();
        fs::write(target.join("keep.txt"), b"x").await.unwrap();

        let err = write_atomic(&target, b"content").await.unwrap_err();

        assert!(err.to_string().contains("Failed to rename"));
        let mut names = Vec::new();
        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        assert_eq!(names, vec!["occupied".to_string()]);
    }

    #[tokio::test]
    async fn removing_absent_temp_file_is_quiet() {
        let dir = TempDir::new().unwrap();

        remove_temp(&dir.path().join(".never-written.tmp")).await;
    }

    #[test]
    fn temp_paths_are_unique_siblings() {
        let path = Path::new("/data/memories.json");
        let a = temp_path_for(path);
        let b = temp_path_for(path);

        assert_ne!(a, b);
        assert_eq!(a.parent(), path.parent());
        assert!(a.to_string_lossy().ends_with(".tmp"));
    }
}
