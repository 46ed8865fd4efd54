//! Answer record - the prompt → answer mapping owned by the storytelling session.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::prompt::Prompts;
use crate::domain::foundation::ValidationError;

/// Returns true if an answer counts as "unanswered".
pub fn is_blank(answer: &str) -> bool {
    answer.trim().is_empty()
}

/// Ordered mapping from prompt to free-text answer.
///
/// Order is either the configured prompt order (records built from a
/// submission) or the order entries were read from disk. Serializes as a flat
/// JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerRecord {
    entries: Vec<(String, String)>,
}

impl AnswerRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from a user submission.
    ///
    /// The result holds exactly the configured prompts, in configured order.
    /// Prompts missing from the submission get an empty answer.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownPrompt` if the submission names a
    /// prompt that is not configured.
    pub fn from_submission<I>(prompts: &Prompts, submission: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let submitted: Vec<(String, String)> = submission.into_iter().collect();
        if let Some((unknown, _)) = submitted.iter().find(|(p, _)| !prompts.contains(p)) {
            return Err(ValidationError::unknown_prompt(unknown.clone()));
        }

        let mut record = Self::new();
        for prompt in prompts.iter() {
            let answer = submitted
                .iter()
                .rev()
                .find(|(p, _)| p == prompt)
                .map(|(_, a)| a.clone())
                .unwrap_or_default();
            record.set(prompt, answer);
        }
        Ok(record)
    }

    /// Sets the answer for a prompt, keeping the prompt's existing position.
    pub fn set(&mut self, prompt: impl Into<String>, answer: impl Into<String>) {
        let prompt = prompt.into();
        let answer = answer.into();
        match self.entries.iter_mut().find(|(p, _)| *p == prompt) {
            Some(entry) => entry.1 = answer,
            None => self.entries.push((prompt, answer)),
        }
    }

    /// Builder form of [`AnswerRecord::set`].
    pub fn with(mut self, prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        self.set(prompt, answer);
        self
    }

    pub fn get(&self, prompt: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == prompt)
            .map(|(_, a)| a.as_str())
    }

    /// All entries in record order, answered or not.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, a)| (p.as_str(), a.as_str()))
    }

    /// Entries whose answer is not blank, in record order.
    pub fn answered(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(_, a)| !is_blank(a))
    }

    pub fn answered_count(&self) -> usize {
        self.answered().count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AnswerRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (prompt, answer) in &self.entries {
            map.serialize_entry(prompt, answer)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnswerRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = AnswerRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object of prompt strings to answer strings")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut record = AnswerRecord::new();
                while let Some((prompt, answer)) = access.next_entry::<String, String>()? {
                    record.set(prompt, answer);
                }
                Ok(record)
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompts() -> Prompts {
        Prompts::new(["Q1", "Q2", "Q3"])
    }

    #[test]
    fn blank_detection_covers_whitespace() {
        assert!(is_blank(""));
        assert!(is_blank("  \n\t"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn from_submission_follows_prompt_order() {
        let record = AnswerRecord::from_submission(
            &prompts(),
            vec![
                ("Q3".to_string(), "third".to_string()),
                ("Q1".to_string(), "first".to_string()),
            ],
        )
        .unwrap();

        let keys: Vec<&str> = record.iter().map(|(p, _)| p).collect();
        assert_eq!(keys, vec!["Q1", "Q2", "Q3"]);
        assert_eq!(record.get("Q2"), Some(""));
        assert_eq!(record.get("Q3"), Some("third"));
    }

    #[test]
    fn from_submission_rejects_unknown_prompt() {
        let result = AnswerRecord::from_submission(
            &prompts(),
            vec![("Q9".to_string(), "nope".to_string())],
        );
        assert_eq!(result, Err(ValidationError::unknown_prompt("Q9")));
    }

    #[test]
    fn answered_skips_blank_entries() {
        let record = AnswerRecord::new()
            .with("Q1", "  ")
            .with("Q2", "I loved summers at the lake.");

        let answered: Vec<_> = record.answered().collect();
        assert_eq!(answered, vec![("Q2", "I loved summers at the lake.")]);
        assert_eq!(record.answered_count(), 1);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn set_replaces_in_place() {
        let mut record = AnswerRecord::new().with("Q1", "a").with("Q2", "b");
        record.set("Q1", "c");

        let entries: Vec<_> = record.iter().collect();
        assert_eq!(entries, vec![("Q1", "c"), ("Q2", "b")]);
    }

    #[test]
    fn json_keeps_load_order() {
        let json = r#"{"Zebra": "z", "Apple": "a", "Mango": ""}"#;
        let record: AnswerRecord = serde_json::from_str(json).unwrap();

        let keys: Vec<&str> = record.iter().map(|(p, _)| p).collect();
        assert_eq!(keys, vec!["Zebra", "Apple", "Mango"]);
    }

    #[test]
    fn json_rejects_non_string_values() {
        let result = serde_json::from_str::<AnswerRecord>(r#"{"Q1": 42}"#);
        assert!(result.is_err());
    }

    #[test]
    fn serializes_as_flat_object() {
        let record = AnswerRecord::new().with("Q1", "a");
        assert_eq!(serde_json::to_string(&record).unwrap(), r#"{"Q1":"a"}"#);
    }
}
