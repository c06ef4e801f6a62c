//! Prompt library error types

use thiserror::Error;

/// Result alias for prompt library operations
pub type Result<T> = std::result::Result<T, LibraryError>;

/// Errors that can occur while loading or exporting the prompt library
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Failed to parse prompt library: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate prompt id: {0}")]
    DuplicateId(String),

    #[error("Prompt entry at position {0} has an empty id")]
    EmptyId(usize),

    #[error("Duplicate category id: {0}")]
    DuplicateCategory(String),

    #[error("Template error: {0}")]
    Template(String),
}

impl From<handlebars::TemplateError> for LibraryError {
    fn from(err: handlebars::TemplateError) -> Self {
        LibraryError::Template(err.to_string())
    }
}

impl From<handlebars::RenderError> for LibraryError {
    fn from(err: handlebars::RenderError) -> Self {
        LibraryError::Template(err.to_string())
    }
}
