//! Command PDF renderer - pipes HTML through an external HTML-to-PDF tool.
//!
//! The default invocation is `wkhtmltopdf --quiet - -`: HTML on stdin, PDF on
//! stdout. Any tool following the same stdin/stdout convention can be used.

use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::ports::{looks_like_pdf, PdfRenderer, RenderError};

/// Renderer backed by an external command.
///
/// # Example
///
/// ```rust,ignore
/// let renderer = CommandPdfRenderer::new("wkhtmltopdf")
///     .with_timeout(Duration::from_secs(30));
///
/// let pdf = renderer.render("<html>...</html>").await?;
/// ```
#[derive(Debug, Clone)]
pub struct CommandPdfRenderer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandPdfRenderer {
    /// Creates a renderer for `program` with wkhtmltopdf-style arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["--quiet".to_string(), "-".to_string(), "-".to_string()],
            timeout: Duration::from_secs(30),
        }
    }

    /// Replaces the argument list.
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the time allowed for one conversion.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl PdfRenderer for CommandPdfRenderer {
    fn name(&self) -> &str {
        &self.program
    }

    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => {
                    RenderError::unavailable(format!("{} is not installed", self.program))
                }
                _ => RenderError::unavailable(format!("Failed to start {}: {}", self.program, e)),
            })?;

        // Feed stdin concurrently so a large document cannot deadlock on full pipes.
        let stdin_writer = child.stdin.take().map(|mut stdin| {
            let input = html.as_bytes().to_vec();
            tokio::spawn(async move {
                let result = stdin.write_all(&input).await;
                drop(stdin);
                result
            })
        });

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| RenderError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| RenderError::failed(format!("{} execution failed: {}", self.program, e)))?;

        if let Some(writer) = stdin_writer {
            match writer.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    tracing::debug!(error = %e, "Renderer closed stdin early");
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Renderer stdin task failed");
                }
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::failed(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        if !looks_like_pdf(&output.stdout) {
            return Err(RenderError::invalid_output(format!(
                "{} output is not a PDF ({} bytes)",
                self.program,
                output.stdout.len()
            )));
        }

        Ok(output.stdout)
    }
}
