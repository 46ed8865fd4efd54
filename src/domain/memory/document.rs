//! Document Assembler - turns an answer record into a self-contained HTML page.
//!
//! Assembly is a pure function of the record and the options; the date stamp
//! is passed in by the caller so that output is reproducible.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use super::answers::AnswerRecord;

/// Title used when the caller doesn't pick one.
pub const DEFAULT_TITLE: &str = "Family Memories";

/// Visual variant of the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentStyle {
    /// Embedded stylesheet; used for polished documents.
    #[default]
    Styled,
    /// Bare markup, no stylesheet; used when answers are not polished.
    Plain,
}

/// Options controlling document assembly.
#[derive(Debug, Clone)]
pub struct AssemblyOptions {
    pub title: String,
    pub style: DocumentStyle,
    pub include_toc: bool,
    /// Date printed under the cover heading.
    pub generated_on: NaiveDate,
}

impl AssemblyOptions {
    /// Styled document with a table of contents.
    pub fn new(generated_on: NaiveDate) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            style: DocumentStyle::Styled,
            include_toc: true,
            generated_on,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_style(mut self, style: DocumentStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_toc(mut self, include_toc: bool) -> Self {
        self.include_toc = include_toc;
        self
    }
}

/// A generated HTML memory compilation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    html: String,
    section_titles: Vec<String>,
}

impl Document {
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    /// Prompts that received a section, in body order.
    pub fn section_titles(&self) -> &[String] {
        &self.section_titles
    }

    pub fn section_count(&self) -> usize {
        self.section_titles.len()
    }

    /// The visible text of the document with markup removed and whitespace
    /// collapsed to single spaces.
    pub fn flattened_text(&self) -> String {
        flatten_html(&self.html)
    }

    /// First `max_chars` characters of the flattened text.
    pub fn preview(&self, max_chars: usize) -> String {
        self.flattened_text().chars().take(max_chars).collect()
    }
}

/// Builds memory documents from answer records.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentAssembler;

impl DocumentAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Assembles one document from the answered prompts of `record`.
    ///
    /// Unanswered prompts appear neither in the table of contents nor in the
    /// body. All user text is escaped.
    pub fn assemble(&self, record: &AnswerRecord, options: &AssemblyOptions) -> Document {
        let answered: Vec<(&str, &str)> = record.answered().collect();
        let date = options.generated_on.format("%B %d, %Y").to_string();

        let mut html = String::with_capacity(2048);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", html_escape(&options.title)));
        if options.style == DocumentStyle::Styled {
            html.push_str("<style>");
            html.push_str(MEMORY_CSS);
            html.push_str("</style>\n");
        }
        html.push_str("</head>\n<body>\n<article class=\"memory-book\">\n");

        html.push_str("<header>\n");
        html.push_str(&format!("<h1>{}</h1>\n", html_escape(&options.title)));
        html.push_str(&format!("<p class=\"date\">{}</p>\n", date));
        html.push_str("</header>\n<hr>\n");

        if options.include_toc && !answered.is_empty() {
            html.push_str("<nav class=\"toc\">\n<h2>Contents</h2>\n<ol>\n");
            for (index, (prompt, _)) in answered.iter().enumerate() {
                html.push_str(&format!(
                    "<li><a href=\"#{}\">{}</a></li>\n",
                    section_anchor(index),
                    html_escape(prompt)
                ));
            }
            html.push_str("</ol>\n</nav>\n");
        }

        for (index, (prompt, answer)) in answered.iter().enumerate() {
            html.push_str(&format!(
                "<section id=\"{}\">\n<h2>{}</h2>\n",
                section_anchor(index),
                html_escape(prompt)
            ));
            for paragraph in paragraphs(answer) {
                html.push_str(&format!("<p>{}</p>\n", paragraph));
            }
            html.push_str("</section>\n");
        }

        html.push_str("</article>\n</body>\n</html>\n");

        Document {
            html,
            section_titles: answered.iter().map(|(p, _)| p.to_string()).collect(),
        }
    }
}

fn section_anchor(index: usize) -> String {
    format!("memory-{}", index + 1)
}

/// Splits an answer on blank lines into escaped paragraphs; single line
/// breaks inside a paragraph become `<br>`.
fn paragraphs(answer: &str) -> Vec<String> {
    let normalized = answer.replace("\r\n", "\n");
    PARAGRAPH_BREAK
        .split(normalized.trim())
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.lines()
                .map(|line| html_escape(line.trim()))
                .collect::<Vec<_>>()
                .join("<br>\n")
        })
        .collect()
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n[ \t]*\n").expect("paragraph regex is valid"));

static STYLE_OR_SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<(style|script|title)[^>]*>.*?</(style|script|title)>")
        .expect("style regex is valid")
});

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag regex is valid"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Strips markup from an HTML string, leaving the visible text.
pub fn flatten_html(html: &str) -> String {
    let without_blocks = STYLE_OR_SCRIPT.replace_all(html, " ");
    let without_tags = TAG.replace_all(&without_blocks, " ");
    let unescaped = without_tags
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    WHITESPACE.replace_all(&unescaped, " ").trim().to_string()
}

const MEMORY_CSS: &str = r#"
:root {
    --accent: #b45309;
    --text: #292524;
    --muted: #78716c;
    --rule: #e7e5e4;
}
body {
    font-family: Georgia, 'Times New Roman', serif;
    font-size: 17px;
    line-height: 1.7;
    color: var(--text);
    max-width: 760px;
    margin: 0 auto;
    padding: 2rem;
}
h1 {
    font-size: 2.2rem;
    color: var(--accent);
    margin-bottom: 0.25rem;
}
.date {
    color: var(--muted);
    font-style: italic;
    margin-top: 0;
}
hr {
    border: none;
    border-top: 1px solid var(--rule);
    margin: 2em 0;
}
.toc ol {
    padding-left: 1.5em;
}
.toc a {
    color: var(--text);
    text-decoration: none;
}
section h2 {
    font-size: 1.3rem;
    color: var(--accent);
    border-bottom: 1px solid var(--rule);
    padding-bottom: 0.25rem;
}
@media print {
    body { font-size: 12pt; padding: 0; }
    section { page-break-inside: avoid; }
}
"#;
