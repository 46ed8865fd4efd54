//! Plain-text PDF renderer - last-resort fallback needing no external tools.
//!
//! The HTML source is laid out verbatim as monospaced lines: Courier, wrapped
//! to the page width, paginated on A4. No markup is interpreted.

use async_trait::async_trait;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;

use crate::ports::{PdfRenderer, RenderError};

const PAGE_WIDTH: Mm = Mm(210.0);
const PAGE_HEIGHT: Mm = Mm(297.0);
const MARGIN_LEFT: f32 = 20.0;
const TOP_Y: f32 = 280.0;
const BOTTOM_Y: f32 = 20.0;
const FONT_SIZE: f32 = 9.0;
const LINE_HEIGHT: f32 = 4.2;
/// Courier at 9pt is 1.905mm per glyph; 170mm of usable width.
const COLUMNS: usize = 88;

/// Renders HTML source text into a PDF with `printpdf`.
#[derive(Debug, Clone)]
pub struct PlainTextPdfRenderer {
    title: String,
}

impl Default for PlainTextPdfRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PlainTextPdfRenderer {
    pub fn new() -> Self {
        Self {
            title: "Family Memories".to_string(),
        }
    }

    /// Sets the PDF document title metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

#[async_trait]
impl PdfRenderer for PlainTextPdfRenderer {
    fn name(&self) -> &str {
        "plain-text"
    }

    async fn render(&self, html: &str) -> Result<Vec<u8>, RenderError> {
        let title = self.title.clone();
        let lines = layout_lines(html, COLUMNS);

        tokio::task::spawn_blocking(move || write_pdf(&title, &lines))
            .await
            .map_err(|e| RenderError::failed(format!("PDF layout task failed: {}", e)))?
    }
}

/// Splits text into lines no wider than `columns` characters.
///
/// Long lines break at the last space that fits, or hard-break when a single
/// word is wider than the page.
pub(crate) fn layout_lines(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for raw in text.lines() {
        let mut rest: Vec<char> = sanitize(raw.trim_end()).chars().collect();
        if rest.is_empty() {
            lines.push(String::new());
            continue;
        }

        while rest.len() > columns {
            let split = rest[..=columns]
                .iter()
                .rposition(|c| *c == ' ')
                .filter(|&idx| idx > 0)
                .unwrap_or(columns);
            lines.push(rest[..split].iter().collect::<String>().trim_end().to_string());
            let next = if rest.get(split) == Some(&' ') { split + 1 } else { split };
            rest.drain(..next);
        }
        lines.push(rest.into_iter().collect());
    }

    lines
}

/// Builtin PDF fonts only cover Latin-1; anything else becomes '?'.
fn sanitize(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            '\t' => ' ',
            c if c.is_control() => '?',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect()
}

fn lines_per_page() -> usize {
    ((TOP_Y - BOTTOM_Y) / LINE_HEIGHT) as usize + 1
}

fn write_pdf(title: &str, lines: &[String]) -> Result<Vec<u8>, RenderError> {
    let (doc, first_page, first_layer) = PdfDocument::new(title, PAGE_WIDTH, PAGE_HEIGHT, "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Courier)
        .map_err(|e| RenderError::failed(format!("PDF font error: {e}")))?;

    let mut chunks = lines.chunks(lines_per_page());
    let mut page = Some((first_page, first_layer));

    loop {
        let chunk = chunks.next().unwrap_or(&[]);
        let (page_index, layer_index) = match page.take() {
            Some(first) => first,
            None => doc.add_page(PAGE_WIDTH, PAGE_HEIGHT, "Layer 1"),
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        let mut y = TOP_Y;
        for line in chunk {
            if !line.is_empty() {
                layer.use_text(line.as_str(), FONT_SIZE, Mm(MARGIN_LEFT), Mm(y), &font);
            }
            y -= LINE_HEIGHT;
        }

        if chunks.len() == 0 {
            break;
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| RenderError::failed(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| RenderError::failed(format!("PDF buffer error: {e}")))
}
