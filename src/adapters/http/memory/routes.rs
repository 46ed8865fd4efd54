//! Route configuration for memory endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_export, download_export, generate_document, get_answers, health, list_exports,
    list_prompts, read_aloud, save_answers, MemoryAppState,
};

/// Creates the memory router with all endpoints.
///
/// Routes:
/// - `GET /health` - Liveness check
/// - `GET /api/prompts` - Configured prompts
/// - `GET /api/answers` - Saved answers
/// - `PUT /api/answers` - Replace saved answers
/// - `POST /api/document` - Memory document as HTML
/// - `POST /api/exports` - Export a PDF
/// - `GET /api/exports` - List exports, newest first
/// - `GET /api/exports/:filename` - Download an export
/// - `POST /api/speech` - Narration audio
pub fn memory_router() -> Router<MemoryAppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/prompts", get(list_prompts))
        .route("/api/answers", get(get_answers).put(save_answers))
        .route("/api/document", post(generate_document))
        .route("/api/exports", get(list_exports).post(create_export))
        .route("/api/exports/:filename", get(download_export))
        .route("/api/speech", post(read_aloud))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::pdf::PlainTextPdfRenderer;
    use crate::adapters::storage::{
        JsonAnswerStore, JsonExportLog, LocalAudioStore, LocalExportStorage,
    };
    use crate::adapters::http::memory::MemoryServices;
    use crate::application::{RendererChain, StoryPolisher};
    use crate::domain::memory::Prompts;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app(dir: &TempDir) -> Router {
        let export_dir = dir.path().join("pdf");
        let state = MemoryAppState::new(MemoryServices {
            prompts: Prompts::new(["Q1", "Q2"]),
            title: "Family Memories".to_string(),
            answer_store: Arc::new(JsonAnswerStore::new(dir.path().join("memories.json"))),
            polisher: StoryPolisher::disabled(),
            export_storage: Arc::new(LocalExportStorage::new(&export_dir)),
            export_log: Arc::new(JsonExportLog::new(export_dir.join("pdf_log.json"))),
            renderers: RendererChain::new().then(Arc::new(PlainTextPdfRenderer::new())),
            synthesizer: None,
            audio_store: Arc::new(LocalAudioStore::new(dir.path().join("memories.mp3"))),
        });
        memory_router().with_state(state)
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let dir = TempDir::new().unwrap();

        let response = app(&dir)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], br#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn prompts_are_listed_in_order() {
        let dir = TempDir::new().unwrap();

        let response = app(&dir)
            .oneshot(Request::builder().uri("/api/prompts").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["prompts"], serde_json::json!(["Q1", "Q2"]));
    }

    #[tokio::test]
    async fn speech_without_answers_is_422() {
        let dir = TempDir::new().unwrap();

        let response = app(&dir)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/speech")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "NOTHING_TO_READ");
        assert_eq!(json["message"], "Please answer some questions first.");
    }
}
