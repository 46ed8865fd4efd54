//! The fixed, ordered set of questions presented to the storyteller.

use serde::Serialize;

/// Questions asked out of the box, in presentation order.
pub const DEFAULT_PROMPTS: [&str; 5] = [
    "What is your favorite childhood memory?",
    "Who was your best friend growing up?",
    "What traditions did your family have?",
    "What was the happiest moment in your life?",
    "What advice would you like to give future generations?",
];

/// Ordered, immutable list of prompts.
///
/// A prompt's identity is its exact string value; it doubles as the key of
/// the answer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Prompts(Vec<String>);

impl Prompts {
    /// Creates a prompt list, dropping duplicates while keeping first-seen order.
    pub fn new<I, S>(prompts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for prompt in prompts {
            let prompt = prompt.into();
            if !unique.contains(&prompt) {
                unique.push(prompt);
            }
        }
        Self(unique)
    }

    /// Returns true if the given string is one of the configured prompts.
    pub fn contains(&self, prompt: &str) -> bool {
        self.0.iter().any(|p| p == prompt)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Prompts {
    fn default() -> Self {
        Self::new(DEFAULT_PROMPTS)
    }
}
