//! Error types for the docs sync.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while syncing the docs tree.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Filesystem failure on a specific path.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed.
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

impl SyncError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for docs sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
