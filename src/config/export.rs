//! PDF export configuration

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ValidationError;

/// Export directory, log and renderer settings
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Export log file name, relative to `export_dir`
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// External HTML-to-PDF program; empty disables it
    #[serde(default = "default_renderer_command")]
    pub renderer_command: String,

    /// Whitespace-separated arguments for `renderer_command`; empty keeps
    /// the wkhtmltopdf defaults (`--quiet - -`)
    #[serde(default)]
    pub renderer_args: String,

    #[serde(default = "default_render_timeout")]
    pub render_timeout_secs: u64,

    /// Fall back to the built-in plain text renderer
    #[serde(default = "default_fallback_enabled")]
    pub fallback_enabled: bool,
}

impl ExportConfig {
    pub fn log_path(&self) -> PathBuf {
        self.export_dir.join(&self.log_file)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    /// Explicit renderer arguments, if any were configured.
    pub fn renderer_args(&self) -> Option<Vec<String>> {
        let args: Vec<String> = self
            .renderer_args
            .split_whitespace()
            .map(str::to_string)
            .collect();
        (!args.is_empty()).then_some(args)
    }

    pub fn has_renderer_command(&self) -> bool {
        !self.renderer_command.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.export_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyPath("export.export_dir"));
        }
        if self.log_file.trim().is_empty() {
            return Err(ValidationError::EmptyPath("export.log_file"));
        }
        if self.render_timeout_secs == 0 || self.render_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout("export.render_timeout_secs"));
        }
        if !self.has_renderer_command() && !self.fallback_enabled {
            return Err(ValidationError::MissingRequired("export.renderer_command"));
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            log_file: default_log_file(),
            renderer_command: default_renderer_command(),
            renderer_args: String::new(),
            render_timeout_secs: default_render_timeout(),
            fallback_enabled: default_fallback_enabled(),
        }
    }
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("pdf")
}

fn default_log_file() -> String {
    "pdf_log.json".to_string()
}

fn default_renderer_command() -> String {
    "wkhtmltopdf".to_string()
}

fn default_render_timeout() -> u64 {
    30
}

fn default_fallback_enabled() -> bool {
    true
}
