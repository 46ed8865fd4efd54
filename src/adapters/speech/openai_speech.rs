//! OpenAI Speech Synthesizer - Implementation of SpeechSynthesizer for the
//! OpenAI text-to-speech endpoint.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAISpeechConfig::new(api_key)
//!     .with_voice("alloy")
//!     .with_timeout(Duration::from_secs(60));
//!
//! let synthesizer = OpenAISpeechSynthesizer::new(config)?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use std::time::Duration;

use crate::ports::{AudioClip, SpeechError, SpeechSynthesizer};

/// The endpoint rejects inputs longer than this many characters.
const MAX_INPUT_CHARS: usize = 4096;

/// Configuration for the OpenAI speech synthesizer.
#[derive(Debug, Clone)]
pub struct OpenAISpeechConfig {
    api_key: Secret<String>,
    /// TTS model (e.g., "tts-1").
    pub model: String,
    /// Voice name (e.g., "alloy").
    pub voice: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAISpeechConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Speech synthesizer calling `POST {base_url}/audio/speech`.
pub struct OpenAISpeechSynthesizer {
    config: OpenAISpeechConfig,
    client: Client,
}

impl OpenAISpeechSynthesizer {
    pub fn new(config: OpenAISpeechConfig) -> Result<Self, SpeechError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SpeechError::provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.config.base_url.trim_end_matches('/'))
    }

    fn to_request<'a>(&'a self, text: &'a str) -> SpeechRequest<'a> {
        let input = match text.char_indices().nth(MAX_INPUT_CHARS) {
            Some((idx, _)) => {
                tracing::warn!(
                    chars = text.chars().count(),
                    limit = MAX_INPUT_CHARS,
                    "Narration too long, truncating"
                );
                &text[..idx]
            }
            None => text,
        };

        SpeechRequest {
            model: &self.config.model,
            voice: &self.config.voice,
            input,
            response_format: "mp3",
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAISpeechSynthesizer {
    async fn synthesize(&self, text: &str) -> Result<AudioClip, SpeechError> {
        let response = self
            .client
            .post(self.speech_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&self.to_request(text))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout(self.config.timeout.as_secs())
                } else {
                    SpeechError::provider(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => SpeechError::provider("authentication failed"),
                429 => SpeechError::provider("rate limited"),
                _ => SpeechError::provider(format!("status {}: {}", status, body.trim())),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::provider(format!("Failed to read audio: {}", e)))?;
        if bytes.is_empty() {
            return Err(SpeechError::provider("empty audio response"));
        }

        Ok(AudioClip::mp3(bytes.to_vec()))
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthesizer() -> OpenAISpeechSynthesizer {
        OpenAISpeechSynthesizer::new(OpenAISpeechConfig::new("test")).unwrap()
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAISpeechConfig::new("sk-secret-value")
            .with_model("tts-1-hd")
            .with_voice("nova")
            .with_base_url("http://localhost:1234/v1")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.model, "tts-1-hd");
        assert_eq!(config.voice, "nova");
        assert_eq!(config.base_url, "http://localhost:1234/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!format!("{:?}", config).contains("sk-secret-value"));
    }

    #[test]
    fn request_body_asks_for_mp3() {
        let synth = synthesizer();
        let json = serde_json::to_value(synth.to_request("Q: A")).unwrap();

        assert_eq!(json["model"], "tts-1");
        assert_eq!(json["voice"], "alloy");
        assert_eq!(json["input"], "Q: A");
        assert_eq!(json["response_format"], "mp3");
    }

    #[test]
    fn long_input_is_truncated_on_a_char_boundary() {
        let synth = synthesizer();
        let text = "é".repeat(MAX_INPUT_CHARS + 10);

        let request = synth.to_request(&text);

        assert_eq!(request.input.chars().count(), MAX_INPUT_CHARS);
    }

    #[test]
    fn speech_url_is_under_base() {
        assert_eq!(synthesizer().speech_url(), "https://api.openai.com/v1/audio/speech");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_provider_error() {
        let config = OpenAISpeechConfig::new("test")
            .with_base_url("http://127.0.0.1:9")
            .with_timeout(Duration::from_secs(2));
        let synth = OpenAISpeechSynthesizer::new(config).unwrap();

        let err = synth.synthesize("hello").await.unwrap_err();
        assert!(matches!(err, SpeechError::Provider(_) | SpeechError::Timeout(_)));
    }
}
