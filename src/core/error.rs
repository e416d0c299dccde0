//! Error types for the tally library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using tally's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during metrics collection and reporting.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading a source file or writing a report sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error. Fatal; surfaced before any analysis runs.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Per-file analysis error (malformed input that defeats tokenization).
    #[error("Analysis error in {path}: {message}")]
    Analysis { path: PathBuf, message: String },

    /// Serialization error from a structured formatter.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new per-file analysis error.
    pub fn analysis(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Analysis {
            path: path.into(),
            message: message.into(),
        }
    }
}
