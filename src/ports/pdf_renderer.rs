//! PDF Renderer Port - HTML to PDF conversion strategies.
//!
//! Renderers are tried in order by the export pipeline; a renderer that fails
//! reports why and the next one gets its turn.

use async_trait::async_trait;
use thiserror::Error;

/// A strategy that turns an HTML document into PDF bytes.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    /// Short name used in diagnostics (e.g. "wkhtmltopdf", "plain-text").
    fn name(&self) -> &str;

    /// Render the HTML document.
    ///
    /// The returned bytes are a complete PDF file.
    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError>;
}

/// Errors a single renderer can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The external renderer is not installed or could not be started.
    #[error("renderer unavailable: {0}")]
    Unavailable(String),

    /// The renderer ran but failed.
    #[error("rendering failed: {0}")]
    Failed(String),

    /// The renderer produced something that is not a PDF.
    #[error("renderer produced invalid output: {0}")]
    InvalidOutput(String),

    /// The renderer did not finish in time.
    #[error("rendering timed out after {0} seconds")]
    Timeout(u64),
}

impl RenderError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }

    pub fn invalid_output(reason: impl Into<String>) -> Self {
        Self::InvalidOutput(reason.into())
    }
}

/// Returns true if the bytes start with a PDF header.
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_displays_messages() {
        assert_eq!(
            RenderError::unavailable("wkhtmltopdf not found").to_string(),
            "renderer unavailable: wkhtmltopdf not found"
        );
        assert_eq!(
            RenderError::Timeout(30).to_string(),
            "rendering timed out after 30 seconds"
        );
    }

    #[test]
    fn pdf_header_detection() {
        assert!(looks_like_pdf(b"%PDF-1.4\n..."));
        assert!(!looks_like_pdf(b"<html>"));
        assert!(!looks_like_pdf(b""));
    }

    #[test]
    fn pdf_renderer_is_object_safe() {
        fn check<T: PdfRenderer + ?Sized>() {}
        check::<dyn PdfRenderer>();
    }
}
