//! LoadAnswersHandler - Query handler for the saved answer record.

use std::sync::Arc;

use crate::ports::{AnswerStore, LoadOutcome, StorageError};

/// Handler for reading the saved answers.
///
/// A corrupt answers file is not an error: the outcome carries an empty
/// record and the reason it was discarded.
pub struct LoadAnswersHandler {
    store: Arc<dyn AnswerStore>,
}

impl LoadAnswersHandler {
    pub fn new(store: Arc<dyn AnswerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<LoadOutcome, StorageError> {
        self.store.load().await
    }
}
