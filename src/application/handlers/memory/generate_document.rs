//! GenerateDocumentHandler - builds the memory document from saved answers.
//!
//! Produces content without side effects: nothing is written.

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::application::StoryPolisher;
use crate::domain::memory::{
    AssemblyOptions, Document, DocumentAssembler, DocumentStyle, DEFAULT_TITLE,
};
use crate::ports::{AnswerStore, StorageError};

/// Command to generate the memory document.
#[derive(Debug, Clone)]
pub struct GenerateDocumentCommand {
    /// Rewrite answers through the story polisher and use the styled layout.
    pub polish: bool,
    pub include_toc: bool,
    /// Date printed under the title.
    pub generated_on: NaiveDate,
}

impl GenerateDocumentCommand {
    /// A command dated today in local time, with a table of contents.
    pub fn today(polish: bool) -> Self {
        Self {
            polish,
            include_toc: true,
            generated_on: Local::now().date_naive(),
        }
    }

    pub fn with_toc(mut self, include_toc: bool) -> Self {
        self.include_toc = include_toc;
        self
    }
}

/// Handler for generating memory documents.
///
/// # Dependencies
///
/// - `AnswerStore`: saved answers
/// - `StoryPolisher`: optional prose rewrite
pub struct GenerateDocumentHandler {
    store: Arc<dyn AnswerStore>,
    polisher: StoryPolisher,
    assembler: DocumentAssembler,
    title: String,
}

impl GenerateDocumentHandler {
    pub fn new(store: Arc<dyn AnswerStore>, polisher: StoryPolisher) -> Self {
        Self {
            store,
            polisher,
            assembler: DocumentAssembler::new(),
            title: DEFAULT_TITLE.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub async fn handle(&self, cmd: GenerateDocumentCommand) -> Result<Document, StorageError> {
        let record = self.store.load().await?.into_record();

        let (record, style) = if cmd.polish {
            (self.polisher.polish_record(&record).await, DocumentStyle::Styled)
        } else {
            (record, DocumentStyle::Plain)
        };

        let options = AssemblyOptions::new(cmd.generated_on)
            .with_title(self.title.clone())
            .with_style(style)
            .with_toc(cmd.include_toc);

        let document = self.assembler.assemble(&record, &options);
        tracing::debug!(
            sections = document.section_count(),
            polish = cmd.polish,
            "Generated memory document"
        );
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::storage::JsonAnswerStore;
    use crate::domain::memory::AnswerRecord;
    use tempfile::TempDir;

    fn command(polish: bool) -> GenerateDocumentCommand {
        GenerateDocumentCommand {
            polish,
            include_toc: true,
            generated_on: NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
        }
    }

    async fn store_with(dir: &TempDir, record: &AnswerRecord) -> Arc<JsonAnswerStore> {
        let store = Arc::new(JsonAnswerStore::new(dir.path().join("memories.json")));
        store.save(record).await.unwrap();
        store
    }

    fn scenario() -> AnswerRecord {
        AnswerRecord::new()
            .with("Q1", "  ")
            .with("Q2", "I loved summers at the lake.")
    }

    #[tokio::test]
    async fn plain_document_has_one_section_for_the_answered_prompt() {
        let dir = TempDir::new().unwrap();
        let handler =
            GenerateDocumentHandler::new(store_with(&dir, &scenario()).await, StoryPolisher::disabled());

        let document = handler.handle(command(false)).await.unwrap();

        assert_eq!(document.section_titles(), &["Q2".to_string()]);
        assert!(!document.html().contains("Q1"));
        assert!(!document.html().contains("<style>"));
        assert!(document.html().contains("March 07, 2024"));
    }

    #[tokio::test]
    async fn polished_document_is_styled_and_uses_rewrites() {
        let dir = TempDir::new().unwrap();
        let mock = MockAIProvider::new().with_response("Every summer we swam in the lake.");
        let handler = GenerateDocumentHandler::new(
            store_with(&dir, &scenario()).await,
            StoryPolisher::new(Some(Arc::new(mock.clone()))),
        );

        let document = handler.handle(command(true)).await.unwrap();

        assert!(document.html().contains("<style>"));
        assert!(document.html().contains("Every summer we swam in the lake."));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn failing_provider_still_produces_the_document() {
        let dir = TempDir::new().unwrap();
        let mock = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "down".to_string(),
        });
        let handler = GenerateDocumentHandler::new(
            store_with(&dir, &scenario()).await,
            StoryPolisher::new(Some(Arc::new(mock))),
        );

        let document = handler.handle(command(true)).await.unwrap();

        assert!(document.html().contains("I loved summers at the lake."));
    }

    #[tokio::test]
    async fn no_saved_answers_yields_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(JsonAnswerStore::new(dir.path().join("missing.json")));
        let handler = GenerateDocumentHandler::new(store, StoryPolisher::disabled());

        let document = handler.handle(command(false)).await.unwrap();

        assert_eq!(document.section_count(), 0);
        assert!(!document.html().contains("<ol"));
    }

    #[tokio::test]
    async fn custom_title_is_used() {
        let dir = TempDir::new().unwrap();
        let handler =
            GenerateDocumentHandler::new(store_with(&dir, &scenario()).await, StoryPolisher::disabled())
                .with_title("Grandma's Stories");

        let document = handler.handle(command(false)).await.unwrap();

        assert!(document.html().contains("<h1>Grandma&#39;s Stories</h1>"));
    }
}
