//! Error types for the grounding-set search algorithms.
//!
//! A grounding set that fails to cover the graph is a normal result, not an
//! error. Errors here are invalid inputs: an empty graph, unknown words, or
//! sampling parameters that cannot be honoured.

use groundset_core::GraphError;
use thiserror::Error;

/// Errors produced by the search and sampling entry points.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Graph-level failure (empty graph, unknown grounding words).
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A sweep asked for more random words than there are candidates.
    #[error("sample size {k} exceeds the {available} non-mandatory words")]
    SampleTooLarge { k: usize, available: usize },

    /// A sweep or bootstrap was configured with zero trials.
    #[error("trial count must be positive")]
    NoTrials,

    /// A bootstrap was configured with zero resamples.
    #[error("bootstrap resample count must be positive")]
    NoResamples,

    /// Confidence level outside the open interval (0, 1).
    #[error("confidence level must lie strictly between 0 and 1, got {confidence}")]
    InvalidConfidence { confidence: f64 },

    #[error("internal error: {message}")]
    Internal { message: String },
}
