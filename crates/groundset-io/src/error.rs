//! Error types for groundset-io.

use std::path::PathBuf;

use groundset_core::GraphError;
use thiserror::Error;

/// Errors produced while reading inputs or writing results.
#[derive(Debug, Error)]
pub enum IoError {
    /// A file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file or its parent directory could not be created or written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file was readable but not the expected JSON shape.
    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The adjacency list parsed but does not form a valid graph.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

impl IoError {
    /// Whether the error is about file content rather than file access.
    pub fn is_malformed_input(&self) -> bool {
        matches!(self, IoError::Json { .. } | IoError::Graph(_))
    }
}
