//! StoryPolisher - rewrites answers into prose through an optional AI provider.
//!
//! Polishing never fails the pipeline. Without a provider the polisher is a
//! deterministic pass-through; with one, any provider failure falls back to
//! the original answer.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::memory::{is_blank, AnswerRecord};
use crate::ports::{AIProvider, CompletionRequest, MessageRole};

const SYSTEM_PROMPT: &str = "You help grandparents turn their memories into a family keepsake. \
Rewrite answers as warm, readable first-person prose. Keep every fact, name and date. \
Never invent details. Reply with the rewritten text only.";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the fixed instruction for one (prompt, answer) pair.
pub fn polish_instruction(prompt: &str, answer: &str) -> String {
    format!(
        "Rewrite the following answer as a short, heartfelt blog paragraph.\n\n\
         Question: {prompt}\n\
         Answer: {answer}"
    )
}

/// Polishes answers with an AI provider resolved once at startup.
///
/// # Usage
///
/// ```rust,ignore
/// let polisher = StoryPolisher::new(Some(provider));
/// let prose = polisher.polish("Who was your best friend?", "Ruth, next door").await;
/// ```
#[derive(Clone)]
pub struct StoryPolisher {
    provider: Option<Arc<dyn AIProvider>>,
    timeout: Duration,
    max_tokens: u32,
    temperature: f32,
}

impl StoryPolisher {
    /// Creates a polisher. `None` makes every call a pass-through.
    pub fn new(provider: Option<Arc<dyn AIProvider>>) -> Self {
        match &provider {
            Some(p) => {
                let info = p.provider_info();
                tracing::info!(provider = %info.name, model = %info.model, "Story polishing enabled");
            }
            None => {
                tracing::info!("No AI provider configured, answers will not be polished");
            }
        }

        Self {
            provider,
            timeout: DEFAULT_TIMEOUT,
            max_tokens: 600,
            temperature: 0.7,
        }
    }

    /// A polisher that never calls out.
    pub fn disabled() -> Self {
        Self::new(None)
    }

    /// Sets the overall time allowed for one polish call, retries included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Rewrites one answer. Returns the answer unchanged if polishing is
    /// unavailable or fails, and `""` for a blank answer.
    pub async fn polish(&self, prompt: &str, answer: &str) -> String {
        if is_blank(answer) {
            return String::new();
        }
        let Some(provider) = &self.provider else {
            return answer.to_string();
        };

        let request = CompletionRequest::new()
            .with_system_prompt(SYSTEM_PROMPT)
            .with_message(MessageRole::User, polish_instruction(prompt, answer))
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature);

        match tokio::time::timeout(self.timeout, provider.complete(request)).await {
            Ok(Ok(response)) => {
                let text = response.content.trim();
                if text.is_empty() {
                    tracing::warn!(prompt, "AI provider returned an empty rewrite, keeping original");
                    answer.to_string()
                } else {
                    text.to_string()
                }
            }
            Ok(Err(err)) => {
                tracing::warn!(prompt, error = %err, "Polishing failed, keeping original answer");
                answer.to_string()
            }
            Err(_) => {
                tracing::warn!(
                    prompt,
                    timeout_secs = self.timeout.as_secs(),
                    "Polishing timed out, keeping original answer"
                );
                answer.to_string()
            }
        }
    }

    /// Polishes every answered prompt in order. Unanswered prompts are kept
    /// as they are.
    pub async fn polish_record(&self, record: &AnswerRecord) -> AnswerRecord {
        let mut polished = AnswerRecord::new();
        for (prompt, answer) in record.iter() {
            if is_blank(answer) {
                polished.set(prompt, answer);
            } else {
                let text = self.polish(prompt, answer).await;
                polished.set(prompt, text);
            }
        }
        polished
    }
}

impl std::fmt::Debug for StoryPolisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryPolisher")
            .field("provider", &self.provider.as_ref().map(|p| p.provider_info()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};

    fn polisher_with(mock: &MockAIProvider) -> StoryPolisher {
        StoryPolisher::new(Some(Arc::new(mock.clone())))
    }

    // ════════════════════════════════════════════════════════════════════════
    // Pass-through
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn blank_answer_returns_empty_without_calling_provider() {
        let mock = MockAIProvider::new().with_response("should not be used");
        let polisher = polisher_with(&mock);

        assert_eq!(polisher.polish("Q1", "").await, "");
        assert_eq!(polisher.polish("Q1", "   \n\t").await, "");
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn disabled_polisher_returns_answer_unchanged() {
        let polisher = StoryPolisher::disabled();

        assert!(!polisher.is_enabled());
        assert_eq!(polisher.polish("Q", "Summers at the lake.").await, "Summers at the lake.");
    }

    // ════════════════════════════════════════════════════════════════════════
    // Provider calls
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn polished_text_is_returned_trimmed() {
        let mock = MockAIProvider::new().with_response("  Every summer we went to the lake.\n");
        let polisher = polisher_with(&mock);

        let result = polisher.polish("Favorite memory?", "lake every summer").await;

        assert_eq!(result, "Every summer we went to the lake.");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn instruction_embeds_prompt_and_answer_verbatim() {
        let mock = MockAIProvider::new();
        let polisher = polisher_with(&mock);

        polisher.polish("Who was your best friend?", "Ruth <next door>").await;

        let calls = mock.get_calls();
        let request = &calls[0];
        assert_eq!(request.system_prompt.as_deref(), Some(SYSTEM_PROMPT));
        assert_eq!(request.messages.len(), 1);
        assert!(request.messages[0].content.contains("Question: Who was your best friend?"));
        assert!(request.messages[0].content.contains("Answer: Ruth <next door>"));
    }

    #[tokio::test]
    async fn provider_failure_returns_original_answer() {
        let mock = MockAIProvider::new()
            .with_error(MockError::AuthenticationFailed)
            .with_error(MockError::RateLimited { retry_after_secs: 5 })
            .with_error(MockError::Network {
                message: "reset".to_string(),
            });
        let polisher = polisher_with(&mock);

        for answer in ["one", "two", "three"] {
            assert_eq!(polisher.polish("Q", answer).await, answer);
        }
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn empty_completion_returns_original_answer() {
        let mock = MockAIProvider::new().with_response("   ");
        let polisher = polisher_with(&mock);

        assert_eq!(polisher.polish("Q", "raw").await, "raw");
    }

    #[tokio::test]
    async fn slow_provider_times_out_to_original_answer() {
        let mock = MockAIProvider::new()
            .with_response("too late")
            .with_delay(Duration::from_millis(200));
        let polisher = polisher_with(&mock).with_timeout(Duration::from_millis(20));

        assert_eq!(polisher.polish("Q", "raw").await, "raw");
    }

    // ════════════════════════════════════════════════════════════════════════
    // Records
    // ════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn polish_record_keeps_keys_and_skips_blank_answers() {
        let mock = MockAIProvider::new().with_response("Polished Q2");
        let polisher = polisher_with(&mock);
        let record = AnswerRecord::new()
            .with("Q1", "  ")
            .with("Q2", "I loved summers at the lake.");

        let polished = polisher.polish_record(&record).await;

        let keys: Vec<&str> = polished.iter().map(|(p, _)| p).collect();
        assert_eq!(keys, vec!["Q1", "Q2"]);
        assert_eq!(polished.get("Q1"), Some("  "));
        assert_eq!(polished.get("Q2"), Some("Polished Q2"));
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn instruction_format_is_stable() {
        assert_eq!(
            polish_instruction("Q?", "A."),
            "Rewrite the following answer as a short, heartfelt blog paragraph.\n\nQuestion: Q?\nAnswer: A."
        );
    }
}
