//! PDF Renderer Adapters
//!
//! - `CommandPdfRenderer` - external HTML-to-PDF command (wkhtmltopdf)
//! - `PlainTextPdfRenderer` - built-in monospaced fallback using printpdf

mod command_renderer;
mod plain_text_renderer;

pub use command_renderer::CommandPdfRenderer;
pub use plain_text_renderer::PlainTextPdfRenderer;
