//! Narration text for reading memories aloud.

use super::answers::AnswerRecord;

/// One `"<prompt>: <answer>"` line per answered prompt, in record order.
///
/// Returns an empty string when nothing has been answered.
pub fn narration_text(record: &AnswerRecord) -> String {
    record
        .answered()
        .map(|(prompt, answer)| format!("{}: {}", prompt, answer.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_answered_prompts() {
        let record = AnswerRecord::new()
            .with("Q1", "first")
            .with("Q2", "   ")
            .with("Q3", " third \n");

        assert_eq!(narration_text(&record), "Q1: first\nQ3: third");
    }

    #[test]
    fn empty_when_nothing_answered() {
        let record = AnswerRecord::new().with("Q1", "");
        assert!(narration_text(&record).is_empty());
    }
}
