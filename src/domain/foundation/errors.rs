//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Unknown prompt: '{prompt}'")]
    UnknownPrompt { prompt: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an unknown prompt validation error.
    pub fn unknown_prompt(prompt: impl Into<String>) -> Self {
        ValidationError::UnknownPrompt {
            prompt: prompt.into(),
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error codes organized by category.
///
/// Every error that reaches the HTTP boundary is classified by one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    NothingToRead,

    // Not found errors
    ExportNotFound,

    // Capability errors
    SpeechNotConfigured,
    SpeechProviderError,

    // Infrastructure errors
    StorageError,
    RenderFailed,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::NothingToRead => "NOTHING_TO_READ",
            ErrorCode::ExportNotFound => "EXPORT_NOT_FOUND",
            ErrorCode::SpeechNotConfigured => "SPEECH_NOT_CONFIGURED",
            ErrorCode::SpeechProviderError => "SPEECH_PROVIDER_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::RenderFailed => "RENDER_FAILED",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}
