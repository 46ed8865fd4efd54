//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where answers and narration audio live
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Answers file name, relative to `data_dir`
    #[serde(default = "default_answers_file")]
    pub answers_file: String,

    /// Audio file name, relative to `data_dir`
    #[serde(default = "default_audio_file")]
    pub audio_file: String,
}

impl StorageConfig {
    pub fn answers_path(&self) -> PathBuf {
        self.data_dir.join(&self.answers_file)
    }

    pub fn audio_path(&self) -> PathBuf {
        self.data_dir.join(&self.audio_file)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("storage.data_dir"));
        }
        if self.answers_file.trim().is_empty() {
            return Err(ValidationError::EmptyPath("storage.answers_file"));
        }
        if self.audio_file.trim().is_empty() {
            return Err(ValidationError::EmptyPath("storage.audio_file"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            answers_file: default_answers_file(),
            audio_file: default_audio_file(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_answers_file() -> String {
    "memories.json".to_string()
}

fn default_audio_file() -> String {
    "memories.mp3".to_string()
}
