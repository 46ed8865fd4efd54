//! Export entries - one logged record per PDF export.

use chrono::{DateTime, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Number of characters of flattened document text kept in an entry.
pub const PREVIEW_CHARS: usize = 50;

const FILENAME_PREFIX: &str = "memory_blog_";
const FILENAME_EXTENSION: &str = ".pdf";

/// A logged PDF export. Created once per successful export, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    pub filename: String,
    /// ISO-8601 timestamp of the export.
    pub generated_at: String,
    /// Opening characters of the document text.
    pub preview: String,
}

impl ExportEntry {
    pub fn new<Tz: TimeZone>(
        filename: impl Into<String>,
        generated_at: &DateTime<Tz>,
        preview: impl Into<String>,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            filename: filename.into(),
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, false),
            preview: preview.into(),
        }
    }
}

/// Builds the export filename for a moment in time.
///
/// Sequence 1 yields `memory_blog_YYYYMMDD_HHMM.pdf`; later sequences
/// disambiguate exports made within the same minute with a `_N` suffix.
pub fn export_filename<Tz: TimeZone>(at: &DateTime<Tz>, sequence: u32) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let stamp = at.format("%Y%m%d_%H%M");
    if sequence <= 1 {
        format!("{FILENAME_PREFIX}{stamp}{FILENAME_EXTENSION}")
    } else {
        format!("{FILENAME_PREFIX}{stamp}_{sequence}{FILENAME_EXTENSION}")
    }
}

/// Checks that a client-supplied name refers to an export file and nothing else.
pub fn validate_export_filename(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::empty_field("filename"));
    }
    let stem = name
        .strip_prefix(FILENAME_PREFIX)
        .and_then(|rest| rest.strip_suffix(FILENAME_EXTENSION))
        .ok_or_else(|| {
            ValidationError::invalid_format("filename", "expected memory_blog_<stamp>.pdf")
        })?;
    if stem.is_empty() || !stem.chars().all(|c| c.is_ascii_digit() || c == '_') {
        return Err(ValidationError::invalid_format(
            "filename",
            "stamp may only contain digits and underscores",
        ));
    }
    Ok(())
}
