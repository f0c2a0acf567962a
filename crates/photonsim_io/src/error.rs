//! Error types for photonsim_io.
//!
//! The bookkeeping itself never fails; everything here concerns reading
//! recorded engine streams and writing labelled output.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading replay input or writing labelled output.
#[derive(Error, Debug)]
pub enum IoError {
    /// A value could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Underlying filesystem failure.
    #[error("I/O error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// A JSON document failed to decode.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A replay line that is not a known engine notification.
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    /// Input was blank; the payload names what was expected.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// The input path does not exist.
    #[error("Input not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An error annotated with the operation that raised it.
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result alias for photonsim_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// Creates a serialization error.
    #[must_use]
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a malformed-line error.
    ///
    /// # Parameters
    /// - `line`: 1-based line number in the replay input
    /// - `message`: Decoder message for that line
    #[must_use]
    pub fn malformed<S: Into<String>>(line: usize, message: S) -> Self {
        Self::Malformed {
            line,
            message: message.into(),
        }
    }

    /// Creates a not-found error for `path`.
    #[must_use]
    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        Self::NotFound(path.as_ref().to_path_buf())
    }

    /// Wraps the error with what was being done when it happened.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Innermost error, skipping context layers.
    pub fn root(&self) -> &IoError {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }
}
