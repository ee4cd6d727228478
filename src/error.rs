//! Error types for docmark

use thiserror::Error;

/// Result type alias for docmark operations
pub type Result<T> = std::result::Result<T, DocmarkError>;

/// Docmark error types
///
/// Malformed comments are never an error. The offset variants only surface
/// when a caller translates offsets against the wrong text snapshot.
#[derive(Error, Debug)]
pub enum DocmarkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Offset {offset} is outside text of length {len}")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("Offset {0} is not on a character boundary")]
    NotCharBoundary(usize),

    #[error("Line {line} is outside text with {line_count} lines")]
    LineOutOfBounds { line: usize, line_count: usize },

    #[error("Invalid configuration in {path}: {message}")]
    Config { path: String, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
