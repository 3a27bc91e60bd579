//! Error types for OBJ loading.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for OBJ loading operations.
pub type ObjResult<T> = Result<T, ObjError>;

/// Errors that can occur while loading an OBJ file.
#[derive(Debug, Error)]
pub enum ObjError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// Invalid file content (parse error).
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number where parsing failed.
        line: usize,
        /// Description of what was invalid.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ObjError {
    /// Create a `Parse` error for the given 1-based line.
    #[must_use]
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
