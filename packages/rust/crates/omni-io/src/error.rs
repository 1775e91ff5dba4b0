//! Error types for file I/O operations.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use thiserror::Error;

/// Error types for file I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File does not exist.
    #[error("File not found: {0}")]
    NotFound(String),

    /// File exceeds size limit.
    #[error("File too large: {0} bytes (limit: {1})")]
    TooLarge(u64, u64),

    /// File contains binary content (NULL bytes detected).
    #[error("Binary file detected")]
    BinaryFile,

    /// Content is not valid UTF-8. Source files are rewritten in place, so
    /// lossy decoding is never applied.
    #[error("UTF-8 decoding error")]
    Encoding,

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    System(#[from] std::io::Error),

    /// Renaming the temporary file over the destination failed.
    #[error("Failed to persist {path}: {source}")]
    Persist {
        /// Destination path.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Two copy operations in one batch target the same destination.
    #[error("Duplicate copy destination: {0}")]
    DuplicateDestination(String),

    /// A spawned copy task panicked or was cancelled.
    #[error("Copy task failed: {0}")]
    Task(String),
}
