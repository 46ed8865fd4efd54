//! Answer Store Port - persistence of the answer record.
//!
//! The store is the sole durable copy of a storyteller's answers. Every save
//! rewrites the whole record; there are no partial updates.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::memory::AnswerRecord;

/// Port for loading and saving the answer record.
///
/// # Contract
///
/// Implementations must:
/// - Return an empty record when nothing has been saved yet
/// - Report a corrupt (unparseable) record as [`LoadOutcome::Recovered`]
///   rather than an error
/// - Write atomically so a concurrent reader never sees a partial file
#[async_trait]
pub trait AnswerStore: Send + Sync {
    /// Load the previously saved record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the file exists but cannot be read.
    async fn load(&self) -> Result<LoadOutcome, StorageError>;

    /// Replace the saved record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be written.
    async fn save(&self, record: &AnswerRecord) -> Result<(), StorageError>;
}

/// Result of loading the answer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Record read successfully, or no record saved yet (empty).
    Loaded(AnswerRecord),
    /// The stored record was unreadable; starting from an empty record.
    Recovered { record: AnswerRecord, reason: String },
}

impl LoadOutcome {
    pub fn record(&self) -> &AnswerRecord {
        match self {
            LoadOutcome::Loaded(record) => record,
            LoadOutcome::Recovered { record, .. } => record,
        }
    }

    pub fn into_record(self) -> AnswerRecord {
        match self {
            LoadOutcome::Loaded(record) => record,
            LoadOutcome::Recovered { record, .. } => record,
        }
    }

    /// Why the stored record was discarded, if it was.
    pub fn recovered_reason(&self) -> Option<&str> {
        match self {
            LoadOutcome::Loaded(_) => None,
            LoadOutcome::Recovered { reason, .. } => Some(reason),
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadOutcome::Recovered { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loaded_exposes_record() {
        let record = AnswerRecord::new().with("Q1", "a");
        let outcome = LoadOutcome::Loaded(record.clone());

        assert_eq!(outcome.record(), &record);
        assert!(!outcome.is_recovered());
        assert_eq!(outcome.recovered_reason(), None);
        assert_eq!(outcome.into_record(), record);
    }

    #[test]
    fn recovered_exposes_reason() {
        let outcome = LoadOutcome::Recovered {
            record: AnswerRecord::new(),
            reason: "expected value at line 1".to_string(),
        };

        assert!(outcome.is_recovered());
        assert_eq!(outcome.recovered_reason(), Some("expected value at line 1"));
        assert!(outcome.record().is_empty());
    }

    #[test]
    fn answer_store_is_object_safe() {
        fn check<T: AnswerStore + ?Sized>() {}
        check::<dyn AnswerStore>();
    }
}
