//! Shared error types for docref.
//!
//! Only conditions that stop work are errors. A declaration whose
//! documentation cannot be found, or whose overload cannot be pinned down,
//! is a normal outcome and is reported through the run report instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for docref operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("I/O error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The declaration feed produced by the front end is malformed
    #[error("Declaration feed error: {0}")]
    Feed(String),

    /// A member declaration has no enclosing type-like declaration
    #[error("Structural violation: member '{member}' in {file} has no enclosing type, struct, interface or enum")]
    Structural { member: String, file: PathBuf },

    /// A partition's edits could not be applied
    #[error("Commit of {partition} edits failed: {message}")]
    Commit { partition: String, message: String },

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an I/O error for a path, keeping the underlying cause
    pub fn io(message: impl Into<String>, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    pub fn commit(partition: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Commit {
            partition: partition.into(),
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            path: None,
            source: Some(err),
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
