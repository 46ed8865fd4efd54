//! Renderer chain - ordered PDF renderer strategies, first success wins.
//!
//! Each failure is logged with the renderer name before the next one runs.

use std::fmt;
use std::sync::Arc;

use crate::ports::{PdfRenderer, RenderError};

/// A successfully rendered PDF and the renderer that produced it.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub renderer: String,
}

/// Every renderer in the chain failed; one reason per renderer, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFailures(pub Vec<(String, RenderError)>);

impl fmt::Display for RenderFailures {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "no PDF renderers configured");
        }
        let reasons: Vec<String> = self
            .0
            .iter()
            .map(|(name, err)| format!("{}: {}", name, err))
            .collect();
        write!(f, "{}", reasons.join("; "))
    }
}

/// Ordered list of renderers tried one after another.
#[derive(Clone, Default)]
pub struct RendererChain {
    renderers: Vec<Arc<dyn PdfRenderer>>,
}

impl RendererChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a renderer to the end of the chain.
    pub fn then(mut self, renderer: Arc<dyn PdfRenderer>) -> Self {
        self.renderers.push(renderer);
        self
    }

    pub fn names(&self) -> Vec<String> {
        self.renderers.iter().map(|r| r.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    /// Tries each renderer in order and returns the first PDF produced.
    pub async fn render(&self, html: &str) -> Result<RenderedPdf, RenderFailures> {
        let mut failures = Vec::new();

        for renderer in &self.renderers {
            match renderer.render(html).await {
                Ok(bytes) => {
                    tracing::debug!(renderer = %renderer.name(), bytes = bytes.len(), "Rendered PDF");
                    return Ok(RenderedPdf {
                        bytes,
                        renderer: renderer.name().to_string(),
                    });
                }
                Err(err) => {
                    tracing::warn!(renderer = %renderer.name(), error = %err, "PDF renderer failed, trying next");
                    failures.push((renderer.name().to_string(), err));
                }
            }
        }

        Err(RenderFailures(failures))
    }
}

impl fmt::Debug for RendererChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererChain")
            .field("renderers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubRenderer {
        name: &'static str,
        result: Result<Vec<u8>, RenderError>,
        calls: AtomicUsize,
    }

    impl StubRenderer {
        fn ok(name: &'static str, bytes: &[u8]) -> Arc<Self> {
            Arc::new(Self {
                name,
                result: Ok(bytes.to_vec()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(name: &'static str, err: RenderError) -> Arc<Self> {
            Arc::new(Self {
                name,
                result: Err(err),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl PdfRenderer for StubRenderer {
        fn name(&self) -> &str {
            self.name
        }

        async fn render(&self, _html: &str) -> Result<Vec<u8>, RenderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    #[tokio::test]
    async fn first_success_wins() {
        let second = StubRenderer::ok("second", b"%PDF-2");
        let chain = RendererChain::new()
            .then(StubRenderer::ok("first", b"%PDF-1"))
            .then(second.clone());

        let rendered = chain.render("<html>").await.unwrap();

        assert_eq!(rendered.bytes, b"%PDF-1");
        assert_eq!(rendered.renderer, "first");
        assert_eq!(second.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failure_falls_through_to_next() {
        let chain = RendererChain::new()
            .then(StubRenderer::failing("wkhtmltopdf", RenderError::unavailable("not installed")))
            .then(StubRenderer::ok("plain-text", b"%PDF-fallback"));

        let rendered = chain.render("<html>").await.unwrap();

        assert_eq!(rendered.renderer, "plain-text");
    }

    #[tokio::test]
    async fn all_failing_reports_every_reason() {
        let chain = RendererChain::new()
            .then(StubRenderer::failing("a", RenderError::Timeout(30)))
            .then(StubRenderer::failing("b", RenderError::failed("boom")));

        let failures = chain.render("<html>").await.unwrap_err();

        assert_eq!(failures.0.len(), 2);
        assert_eq!(
            failures.to_string(),
            "a: rendering timed out after 30 seconds; b: rendering failed: boom"
        );
    }

    #[tokio::test]
    async fn empty_chain_fails() {
        let failures = RendererChain::new().render("<html>").await.unwrap_err();
        assert_eq!(failures.to_string(), "no PDF renderers configured");
    }

    #[test]
    fn names_follow_chain_order() {
        let chain = RendererChain::new()
            .then(StubRenderer::ok("x", b""))
            .then(StubRenderer::ok("y", b""));
        assert_eq!(chain.names(), vec!["x", "y"]);
        assert_eq!(chain.len(), 2);
    }
}
