//! Error types for mdshape library.
//!
//! The recovery pipeline itself never fails; these errors come from the
//! edges: reading sources, loading data tables and rendering output.

use std::io;
use thiserror::Error;

/// Result type alias for mdshape operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around the recovery pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON in a data table, unit stream or config file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A data table parsed but violates its own constraints.
    #[error("Invalid data table '{table}': {reason}")]
    InvalidTable {
        /// Table name (file name or logical name)
        table: String,
        /// What is wrong with it
        reason: String,
    },

    /// No converter is registered for the source format.
    #[error("Unsupported source format: {0}")]
    UnsupportedFormat(String),

    /// Source bytes are not valid UTF-8 text.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error during rendering (Markdown, text, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build an [`Error::InvalidTable`] from any displayable reason.
    pub fn invalid_table(table: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Error::InvalidTable {
            table: table.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
