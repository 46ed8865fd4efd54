//! Local Audio Store - the single narration audio file.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::atomic::write_atomic;
use crate::ports::{AudioClip, AudioStore, FilePath, StorageError};

/// Writes each clip over the previous one at a fixed path.
#[derive(Debug, Clone)]
pub struct LocalAudioStore {
    path: PathBuf,
}

impl LocalAudioStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AudioStore for LocalAudioStore {
    async fn save(&self, clip: &AudioClip) -> Result<FilePath, StorageError> {
        write_atomic(&self.path, &clip.bytes).await?;
        tracing::debug!(path = %self.path.display(), bytes = clip.bytes.len(), "Saved narration audio");
        Ok(FilePath::new(self.path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn save_overwrites_previous_clip() {
        let dir = TempDir::new().unwrap();
        let store = LocalAudioStore::new(dir.path().join("data").join("memories.mp3"));

        store.save(&AudioClip::mp3(vec![1, 2, 3])).await.unwrap();
        let path = store.save(&AudioClip::mp3(vec![9])).await.unwrap();

        assert_eq!(path.as_path(), store.path());
        assert_eq!(tokio::fs::read(store.path()).await.unwrap(), vec![9]);
    }
}
