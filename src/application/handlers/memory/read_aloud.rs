//! ReadAloudHandler - narrates the saved answers as an audio file.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::ErrorCode;
use crate::domain::memory::{narration_text, AnswerRecord};
use crate::ports::{AnswerStore, AudioClip, AudioStore, SpeechError, SpeechSynthesizer, StorageError};

#[derive(Debug, Clone, Error)]
pub enum ReadAloudError {
    #[error(transparent)]
    Speech(#[from] SpeechError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ReadAloudError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ReadAloudError::Speech(SpeechError::NothingToRead) => ErrorCode::NothingToRead,
            ReadAloudError::Speech(SpeechError::NotConfigured) => ErrorCode::SpeechNotConfigured,
            ReadAloudError::Speech(_) => ErrorCode::SpeechProviderError,
            ReadAloudError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

/// Handler for reading memories aloud.
///
/// # Dependencies
///
/// - `AnswerStore`: saved answers
/// - `SpeechSynthesizer`: absent when no speech credentials are configured
/// - `AudioStore`: the single audio file, overwritten on each call
pub struct ReadAloudHandler {
    store: Arc<dyn AnswerStore>,
    synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    audio: Arc<dyn AudioStore>,
}

impl ReadAloudHandler {
    pub fn new(
        store: Arc<dyn AnswerStore>,
        synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
        audio: Arc<dyn AudioStore>,
    ) -> Self {
        Self {
            store,
            synthesizer,
            audio,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.synthesizer.is_some()
    }

    /// Narrates the saved answers.
    pub async fn handle(&self) -> Result<AudioClip, ReadAloudError> {
        let record = self.store.load().await?.into_record();
        self.read_aloud(&record).await
    }

    /// Narrates `record` and stores the audio.
    ///
    /// An empty narration is reported before a missing synthesizer, so the
    /// storyteller is first asked to answer something.
    pub async fn read_aloud(&self, record: &AnswerRecord) -> Result<AudioClip, ReadAloudError> {
        let text = narration_text(record);
        if text.is_empty() {
            return Err(SpeechError::NothingToRead.into());
        }
        let synthesizer = self.synthesizer.as_ref().ok_or(SpeechError::NotConfigured)?;

        let clip = synthesizer.synthesize(&text).await.map_err(|err| {
            tracing::warn!(error = %err, "Speech synthesis failed");
            err
        })?;
        let path = self.audio.save(&clip).await?;

        tracing::info!(path = %path, bytes = clip.bytes.len(), "Narration audio saved");
        Ok(clip)
    }
}
