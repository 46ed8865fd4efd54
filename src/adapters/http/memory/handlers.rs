//! HTTP handlers for memory endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::application::{
    ExportError, ExportPdfHandler, GenerateDocumentCommand, GenerateDocumentHandler,
    GetExportError, GetExportHandler, ListExportsHandler, LoadAnswersHandler, PdfExporter,
    ReadAloudError, ReadAloudHandler, RendererChain, SaveAnswersCommand, SaveAnswersError,
    SaveAnswersHandler, StoryPolisher,
};
use crate::domain::foundation::ErrorCode;
use crate::domain::memory::Prompts;
use crate::ports::{
    AnswerStore, AudioStore, ExportFileStorage, ExportLog, SpeechSynthesizer, StorageError,
};

use super::dto::{
    AnswersResponse, DocumentRequest, ErrorResponse, ExportListResponse, ExportRequest,
    ExportResponse, HealthResponse, PromptsResponse, SaveAnswersRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Everything the memory endpoints are built from.
pub struct MemoryServices {
    pub prompts: Prompts,
    pub title: String,
    pub answer_store: Arc<dyn AnswerStore>,
    pub polisher: StoryPolisher,
    pub export_storage: Arc<dyn ExportFileStorage>,
    pub export_log: Arc<dyn ExportLog>,
    pub renderers: RendererChain,
    /// `None` when no speech credentials are configured.
    pub synthesizer: Option<Arc<dyn SpeechSynthesizer>>,
    pub audio_store: Arc<dyn AudioStore>,
}

/// Shared application state containing all handlers.
#[derive(Clone)]
pub struct MemoryAppState {
    prompts: Arc<Prompts>,
    load_answers: Arc<LoadAnswersHandler>,
    save_answers: Arc<SaveAnswersHandler>,
    generate_document: Arc<GenerateDocumentHandler>,
    export_pdf: Arc<ExportPdfHandler>,
    list_exports: Arc<ListExportsHandler>,
    get_export: Arc<GetExportHandler>,
    read_aloud: Arc<ReadAloudHandler>,
}

impl MemoryAppState {
    pub fn new(services: MemoryServices) -> Self {
        let generate_document = Arc::new(
            GenerateDocumentHandler::new(services.answer_store.clone(), services.polisher)
                .with_title(services.title),
        );
        let exporter = Arc::new(PdfExporter::new(
            services.export_storage.clone(),
            services.export_log.clone(),
            services.renderers,
        ));

        Self {
            load_answers: Arc::new(LoadAnswersHandler::new(services.answer_store.clone())),
            save_answers: Arc::new(SaveAnswersHandler::new(
                services.prompts.clone(),
                services.answer_store.clone(),
            )),
            export_pdf: Arc::new(ExportPdfHandler::new(generate_document.clone(), exporter)),
            generate_document,
            list_exports: Arc::new(ListExportsHandler::new(
                services.export_log,
                services.export_storage.clone(),
            )),
            get_export: Arc::new(GetExportHandler::new(services.export_storage)),
            read_aloud: Arc::new(ReadAloudHandler::new(
                services.answer_store,
                services.synthesizer,
                services.audio_store,
            )),
            prompts: Arc::new(services.prompts),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/prompts - Configured prompts in presentation order
pub async fn list_prompts(State(state): State<MemoryAppState>) -> Json<PromptsResponse> {
    Json(PromptsResponse {
        prompts: state.prompts.iter().map(str::to_string).collect(),
    })
}

/// GET /api/answers - The saved answers
pub async fn get_answers(
    State(state): State<MemoryAppState>,
) -> Result<Json<AnswersResponse>, MemoryApiError> {
    let outcome = state.load_answers.handle().await?;
    Ok(Json(outcome.into()))
}

/// GET /api/exports - Exports still on disk, newest first
pub async fn list_exports(
    State(state): State<MemoryAppState>,
) -> Result<Json<ExportListResponse>, MemoryApiError> {
    let entries = state.list_exports.handle().await?;
    Ok(Json(entries.into()))
}

/// GET /api/exports/:filename - Download one PDF
pub async fn download_export(
    State(state): State<MemoryAppState>,
    Path(filename): Path<String>,
) -> Result<Response, MemoryApiError> {
    let bytes = state.get_export.handle(&filename).await?;
    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    Ok((headers, bytes).into_response())
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (PUT/POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// PUT /api/answers - Replace the saved answers
pub async fn save_answers(
    State(state): State<MemoryAppState>,
    Json(request): Json<SaveAnswersRequest>,
) -> Result<Json<AnswersResponse>, MemoryApiError> {
    let cmd = SaveAnswersCommand::new(request.answers.iter());
    let record = state.save_answers.handle(cmd).await?;
    Ok(Json(record.into()))
}

/// POST /api/document - Build the memory document as HTML
pub async fn generate_document(
    State(state): State<MemoryAppState>,
    Json(request): Json<DocumentRequest>,
) -> Result<Html<String>, MemoryApiError> {
    let cmd = GenerateDocumentCommand::today(request.polish)
        .with_toc(request.include_toc.unwrap_or(true));
    let document = state.generate_document.handle(cmd).await?;
    Ok(Html(document.into_html()))
}

/// POST /api/exports - Export the memory document as a PDF
pub async fn create_export(
    State(state): State<MemoryAppState>,
    Json(request): Json<ExportRequest>,
) -> Result<(StatusCode, Json<ExportResponse>), MemoryApiError> {
    let entry = state
        .export_pdf
        .handle(GenerateDocumentCommand::today(request.polish))
        .await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

/// POST /api/speech - Read the saved answers aloud
pub async fn read_aloud(State(state): State<MemoryAppState>) -> Result<Response, MemoryApiError> {
    let clip = state.read_aloud.handle().await?;
    Ok(([(header::CONTENT_TYPE, clip.content_type)], clip.bytes).into_response())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts to HTTP responses.
#[derive(Debug, Clone)]
pub struct MemoryApiError {
    code: ErrorCode,
    message: String,
}

impl MemoryApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::NothingToRead => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::ExportNotFound => StatusCode::NOT_FOUND,
            ErrorCode::SpeechNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::SpeechProviderError => StatusCode::BAD_GATEWAY,
            ErrorCode::StorageError | ErrorCode::RenderFailed | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<StorageError> for MemoryApiError {
    fn from(err: StorageError) -> Self {
        Self::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<SaveAnswersError> for MemoryApiError {
    fn from(err: SaveAnswersError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<ExportError> for MemoryApiError {
    fn from(err: ExportError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<GetExportError> for MemoryApiError {
    fn from(err: GetExportError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<ReadAloudError> for MemoryApiError {
    fn from(err: ReadAloudError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl IntoResponse for MemoryApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "Request failed");
        }
        (status, Json(ErrorResponse::new(self.code, self.message))).into_response()
    }
}
