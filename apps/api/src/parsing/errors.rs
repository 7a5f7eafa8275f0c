use std::time::Duration;

use thiserror::Error;

use crate::parsing::models::FileType;

/// Rejections raised before any loader runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("File is too large ({size} bytes). Maximum size is {} MB.", .limit / (1024 * 1024))]
    TooLarge { size: usize, limit: usize },

    #[error("Unsupported file type '{extension}'. Supported types: PDF, DOCX, DOC, TXT.")]
    UnsupportedType { extension: String },

    #[error("File is empty")]
    Empty,
}

/// Failure of a single loader attempt. Never leaves the parsing module;
/// the pipeline folds it into a [`ParseError::Format`].
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("{0}")]
    Extraction(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Errors returned by [`crate::parsing::DocumentParser::parse_document`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to parse {file_type} file: {reason}")]
    Format { file_type: FileType, reason: String },
}

impl ParseError {
    pub fn format(file_type: FileType, reason: impl Into<String>) -> Self {
        ParseError::Format {
            file_type,
            reason: reason.into(),
        }
    }
}
