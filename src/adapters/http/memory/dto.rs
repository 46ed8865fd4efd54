//! HTTP DTOs for memory endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::memory::{AnswerRecord, ExportEntry};
use crate::ports::LoadOutcome;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to replace the saved answers.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveAnswersRequest {
    /// Prompt to answer; prompts left out are saved empty.
    pub answers: AnswerRecord,
}

/// Request to build the memory document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocumentRequest {
    #[serde(default)]
    pub polish: bool,
    pub include_toc: Option<bool>,
}

/// Request to export the memory document as a PDF.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub polish: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PromptsResponse {
    pub prompts: Vec<String>,
}

/// The saved answers.
#[derive(Debug, Clone, Serialize)]
pub struct AnswersResponse {
    pub answers: AnswerRecord,
    pub answered: usize,
    /// Set when the saved file was unreadable and an empty record was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovered_reason: Option<String>,
}

impl From<LoadOutcome> for AnswersResponse {
    fn from(outcome: LoadOutcome) -> Self {
        let recovered_reason = outcome.recovered_reason().map(str::to_string);
        let answers = outcome.into_record();
        Self {
            answered: answers.answered_count(),
            answers,
            recovered_reason,
        }
    }
}

impl From<AnswerRecord> for AnswersResponse {
    fn from(answers: AnswerRecord) -> Self {
        Self {
            answered: answers.answered_count(),
            answers,
            recovered_reason: None,
        }
    }
}

/// One exported PDF.
#[derive(Debug, Clone, Serialize)]
pub struct ExportResponse {
    pub filename: String,
    pub generated_at: String,
    pub preview: String,
    pub download_url: String,
}

impl From<ExportEntry> for ExportResponse {
    fn from(entry: ExportEntry) -> Self {
        Self {
            download_url: format!("/api/exports/{}", entry.filename),
            filename: entry.filename,
            generated_at: entry.generated_at,
            preview: entry.preview,
        }
    }
}

/// Exports, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct ExportListResponse {
    pub exports: Vec<ExportResponse>,
}

impl From<Vec<ExportEntry>> for ExportListResponse {
    fn from(entries: Vec<ExportEntry>) -> Self {
        Self {
            exports: entries.into_iter().rev().map(ExportResponse::from).collect(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_request_keeps_submitted_order() {
        let json = r#"{"answers": {"B": "second", "A": "first"}}"#;
        let req: SaveAnswersRequest = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = req.answers.iter().map(|(p, _)| p).collect();
        assert_eq!(keys, vec!["B", "A"]);
    }

    #[test]
    fn document_request_defaults() {
        let req: DocumentRequest = serde_json::from_str("{}").unwrap();
        assert!(!req.polish);
        assert!(req.include_toc.is_none());
    }

    #[test]
    fn export_list_is_newest_first() {
        let entries = vec![
            ExportEntry {
                filename: "memory_blog_20240307_1405.pdf".to_string(),
                generated_at: "2024-03-07T14:05:00+00:00".to_string(),
                preview: "old".to_string(),
            },
            ExportEntry {
                filename: "memory_blog_20240308_0900.pdf".to_string(),
                generated_at: "2024-03-08T09:00:00+00:00".to_string(),
                preview: "new".to_string(),
            },
        ];

        let list = ExportListResponse::from(entries);

        assert_eq!(list.exports[0].preview, "new");
        assert_eq!(
            list.exports[1].download_url,
            "/api/exports/memory_blog_20240307_1405.pdf"
        );
    }

    #[test]
    fn recovered_reason_is_omitted_when_loaded() {
        let response = AnswersResponse::from(LoadOutcome::Loaded(
            AnswerRecord::new().with("Q1", "A1").with("Q2", ""),
        ));
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["answered"], 1);
        assert_eq!(json["answers"]["Q1"], "A1");
        assert!(json.get("recovered_reason").is_none());
    }
}
