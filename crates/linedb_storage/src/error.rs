//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Attempted to address a line beyond the end of storage.
    #[error("line index out of range: index {index}, line count {count}")]
    LineOutOfRange {
        /// The requested line index.
        index: usize,
        /// The current number of lines.
        count: usize,
    },

    /// The payload cannot be stored as a single line.
    #[error("payload contains a line break and cannot be stored as one line")]
    UnencodableLine,
}
