//! SaveAnswersHandler - Command handler for saving a submission of answers.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::memory::{AnswerRecord, Prompts};
use crate::ports::{AnswerStore, StorageError};

/// Command to replace the saved answers.
#[derive(Debug, Clone, Default)]
pub struct SaveAnswersCommand {
    /// Prompt and answer pairs as submitted. Prompts left out are saved empty.
    pub answers: Vec<(String, String)>,
}

impl SaveAnswersCommand {
    pub fn new<I, P, A>(answers: I) -> Self
    where
        I: IntoIterator<Item = (P, A)>,
        P: Into<String>,
        A: Into<String>,
    {
        Self {
            answers: answers
                .into_iter()
                .map(|(p, a)| (p.into(), a.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum SaveAnswersError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SaveAnswersError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SaveAnswersError::Validation(_) => ErrorCode::ValidationFailed,
            SaveAnswersError::Storage(_) => ErrorCode::StorageError,
        }
    }
}

/// Handler for saving answers.
///
/// The saved record always holds exactly the configured prompts, in
/// configured order.
pub struct SaveAnswersHandler {
    prompts: Prompts,
    store: Arc<dyn AnswerStore>,
}

impl SaveAnswersHandler {
    pub fn new(prompts: Prompts, store: Arc<dyn AnswerStore>) -> Self {
        Self { prompts, store }
    }

    pub async fn handle(&self, cmd: SaveAnswersCommand) -> Result<AnswerRecord, SaveAnswersError> {
        let record = AnswerRecord::from_submission(&self.prompts, cmd.answers)?;
        self.store.save(&record).await?;
        tracing::info!(answered = record.answered_count(), "Answers saved");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::JsonAnswerStore;
    use crate::ports::LoadOutcome;
    use tempfile::TempDir;

    fn handler(dir: &TempDir) -> (SaveAnswersHandler, Arc<JsonAnswerStore>) {
        let store = Arc::new(JsonAnswerStore::new(dir.path().join("memories.json")));
        let prompts = Prompts::new(["Q1", "Q2", "Q3"]);
        (SaveAnswersHandler::new(prompts, store.clone()), store)
    }

    #[tokio::test]
    async fn saves_in_prompt_order_with_missing_prompts_empty() {
        let dir = TempDir::new().unwrap();
        let (handler, store) = handler(&dir);

        let record = handler
            .handle(SaveAnswersCommand::new([("Q3", "third"), ("Q1", "first")]))
            .await
            .unwrap();

        let pairs: Vec<(&str, &str)> = record.iter().collect();
        assert_eq!(pairs, vec![("Q1", "first"), ("Q2", ""), ("Q3", "third")]);
        assert_eq!(store.load().await.unwrap(), LoadOutcome::Loaded(record));
    }

    #[tokio::test]
    async fn unknown_prompt_is_rejected_and_nothing_saved() {
        let dir = TempDir::new().unwrap();
        let (handler, store) = handler(&dir);

        let err = handler
            .handle(SaveAnswersCommand::new([("Q9", "stray")]))
            .await
            .unwrap_err();

        assert!(matches!(err, SaveAnswersError::Validation(ValidationError::UnknownPrompt { .. })));
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        assert!(store.load().await.unwrap().record().is_empty());
    }
}
