//! Text-to-speech configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// OpenAI API key for speech; falls back to `ai.openai_api_key`
    pub api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_voice")]
    pub voice: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl SpeechConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The speech key, or `fallback` when none is set.
    pub fn resolve_key<'a>(
        &'a self,
        fallback: Option<&'a Secret<String>>,
    ) -> Option<&'a Secret<String>> {
        let usable = |k: &&Secret<String>| !k.expose_secret().is_empty();
        self.api_key
            .as_ref()
            .filter(usable)
            .or(fallback.filter(usable))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("speech.timeout_secs"));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("speech.model"));
        }
        if self.voice.trim().is_empty() {
            return Err(ValidationError::MissingRequired("speech.voice"));
        }
        Ok(())
    }
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            voice: default_voice(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "tts-1".to_string()
}

fn default_voice() -> String {
    "alloy".to_string()
}

fn default_timeout() -> u64 {
    60
}
