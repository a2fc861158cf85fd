//! Filter node error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::linter::LintFailure;

/// Errors that can occur while constructing or running a filter node.
#[derive(Debug, Error)]
pub enum FilterError {
    /// An explicitly configured rule-config path does not exist.
    #[error("Lint config not found: {}", .path.display())]
    ConfigNotFound {
        /// The configured path.
        path: PathBuf,
    },

    /// A present rule-config file is not valid JSON.
    #[error("Unable to parse lint config {}: {source}", .path.display())]
    ConfigParse {
        /// The configured path.
        path: PathBuf,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// An explicitly configured ignore-file path does not exist.
    #[error("Lint ignore file not found: {}", .path.display())]
    IgnoreFileNotFound {
        /// The configured path.
        path: PathBuf,
    },

    /// An ignore pattern could not be compiled.
    #[error("Invalid ignore pattern: {0}")]
    IgnorePattern(#[from] ignore::Error),

    /// The lint engine itself failed on a file.
    #[error(transparent)]
    Lint(#[from] LintFailure),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache error.
    #[error("Cache error: {0}")]
    Cache(#[from] lintsift_cache::CacheError),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FilterError {
    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
