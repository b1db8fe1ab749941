//! Error types for the compiler.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while compiling an agent.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Filesystem failure on a specific path.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Rule file exceeds the maximum size.
    #[error("rule file too large: {path} ({size} bytes > {max} bytes)")]
    FileTooLarge {
        /// Path to the oversized file.
        path: PathBuf,
        /// Actual file size.
        size: u64,
        /// Maximum allowed size.
        max: u64,
    },

    /// The agent has no metadata artifact.
    #[error("metadata for agent '{agent}' not found at {path}")]
    MetadataNotFound {
        /// Agent name.
        agent: String,
        /// Expected metadata path.
        path: PathBuf,
    },

    /// The metadata artifact is not valid JSON for [`AgentMetadata`](rulebook_core::AgentMetadata).
    #[error("invalid metadata in {path}: {source}")]
    MetadataJson {
        /// Metadata path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The agent has no rules directory.
    #[error("rules directory for agent '{agent}' not found at {path}")]
    RulesDirNotFound {
        /// Agent name.
        agent: String,
        /// Expected rules directory.
        path: PathBuf,
    },

    /// The requested agent is not configured.
    #[error("unknown agent: {name} (available: {})", available.join(", "))]
    UnknownAgent {
        /// Requested name.
        name: String,
        /// Configured agent names.
        available: Vec<String>,
    },

    /// A parse task did not complete.
    #[error("parse task failed: {0}")]
    Join(String),
}

impl CompileError {
    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_agent_lists_available() {
        let err = CompileError::UnknownAgent {
            name: "vue".to_string(),
            available: vec!["nextjs-architecture".to_string(), "react-best-practices".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown agent: vue (available: nextjs-architecture, react-best-practices)"
        );
    }

    #[test]
    fn io_error_names_path() {
        let err = CompileError::io(
            "/rules/a.md",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/rules/a.md"));
        assert!(msg.contains("gone"));
    }

    #[test]
    fn metadata_not_found_display() {
        let err = CompileError::MetadataNotFound {
            agent: "react".to_string(),
            path: PathBuf::from("/agents/react/metadata.json"),
        };
        assert!(err.to_string().contains("'react'"));
    }
}
