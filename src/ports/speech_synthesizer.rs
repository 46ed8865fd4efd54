//! Speech Synthesizer Port - text-to-speech providers and the audio file.

use async_trait::async_trait;
use thiserror::Error;

use super::{FilePath, StorageError};

/// Port for turning narration text into audio.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` and return encoded audio.
    async fn synthesize(&self, text: &str) -> Result<AudioClip, SpeechError>;
}

/// Port for the single, ephemeral audio file.
///
/// Each save overwrites the previous clip.
#[async_trait]
pub trait AudioStore: Send + Sync {
    async fn save(&self, clip: &AudioClip) -> Result<FilePath, StorageError>;
}

/// Encoded audio returned by a synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`, e.g. "audio/mpeg".
    pub content_type: String,
}

impl AudioClip {
    pub fn mp3(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            content_type: "audio/mpeg".to_string(),
        }
    }
}

/// Errors from reading memories aloud.
#[derive(Debug, Clone, Error)]
pub enum SpeechError {
    /// Every prompt is unanswered.
    #[error("Please answer some questions first.")]
    NothingToRead,

    /// No speech provider credentials were configured.
    #[error("speech synthesis is not configured")]
    NotConfigured,

    /// The provider call failed.
    #[error("speech provider error: {0}")]
    Provider(String),

    /// The provider did not answer in time.
    #[error("speech request timed out after {0} seconds")]
    Timeout(u64),
}

impl SpeechError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }
}
