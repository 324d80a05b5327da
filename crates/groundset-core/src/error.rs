//! Core error types for groundset-core.
//!
//! Uses `thiserror` for structured, matchable error variants covering the
//! failure modes of graph construction and word resolution.

use thiserror::Error;

/// Errors produced while building or querying a definition graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A definition references a word that is not declared in the graph.
    #[error("malformed graph: '{word}' is defined using undeclared word '{missing}'")]
    MalformedGraph { word: String, missing: String },

    /// The graph has no words at all.
    #[error("graph has no words")]
    EmptyGraph,

    /// A grounding set names words that are not part of the graph.
    #[error("invalid grounding set: {} unknown word(s): {}", unknown.len(), unknown.join(", "))]
    InvalidGroundingSet { unknown: Vec<String> },

    /// The vocabulary does not fit in a 32-bit word index.
    #[error("too many words for a 32-bit index: {count}")]
    TooManyWords { count: usize },
}
