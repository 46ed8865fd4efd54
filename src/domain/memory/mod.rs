//! Memory domain - prompts, answers and the documents built from them.
//!
//! Everything here is pure: no I/O, no clocks. Callers supply the date a
//! document is stamped with and the moment an export happens.

mod answers;
mod document;
mod export_entry;
mod narration;
mod prompt;

pub use answers::{is_blank, AnswerRecord};
pub use document::{
    flatten_html, html_escape, AssemblyOptions, Document, DocumentAssembler, DocumentStyle,
    DEFAULT_TITLE,
};
pub use export_entry::{export_filename, validate_export_filename, ExportEntry, PREVIEW_CHARS};
pub use narration::narration_text;
pub use prompt::{Prompts, DEFAULT_PROMPTS};
