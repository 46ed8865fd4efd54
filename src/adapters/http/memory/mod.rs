//! HTTP adapter for memory endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnswersResponse, DocumentRequest, ErrorResponse, ExportListResponse, ExportRequest,
    ExportResponse, HealthResponse, PromptsResponse, SaveAnswersRequest,
};
pub use handlers::{MemoryApiError, MemoryAppState, MemoryServices};
pub use routes::memory_router;
