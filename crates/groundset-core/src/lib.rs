//! Core data model for grounding-set analysis of dictionary definition graphs.
//!
//! - [`adjacency`]: the predecessor-list interchange form
//! - [`graph`]: the immutable [`DefinitionGraph`]
//! - [`id`]: dense [`WordId`]s
//! - [`word_set`]: [`WordSet`] membership arrays
//! - [`error`]: [`GraphError`]

pub mod adjacency;
pub mod error;
pub mod graph;
pub mod id;
pub mod word_set;

// Re-export commonly used types
pub use adjacency::AdjacencyList;
pub use error::GraphError;
pub use graph::{DanglingWords, DefinitionGraph};
pub use id::WordId;
pub use word_set::WordSet;
