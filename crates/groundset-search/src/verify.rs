//! Grounding-set verification.
//!
//! A grounding set is valid exactly when its closure is the whole graph.
//! An invalid set is a normal outcome: the report lists the words its
//! closure never reaches.

use groundset_core::{DefinitionGraph, WordSet};
use serde::{Deserialize, Serialize};

use crate::closure::closure;
use crate::error::SearchError;

/// Verification report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub valid: bool,
    pub total_nodes: usize,
    pub grounding_set_size: usize,
    pub closure_size: usize,
    /// Words outside the closure, sorted.
    pub missing: Vec<String>,
}

/// Checks whether `grounding` reaches every word of `graph`.
pub fn verify(graph: &DefinitionGraph, grounding: &WordSet) -> Verification {
    let known = closure(graph, grounding);
    let missing = graph.sorted_words(&known.complement());
    tracing::info!(
        grounding_set_size = grounding.len(),
        closure_size = known.len(),
        missing = missing.len(),
        "verified grounding set"
    );
    Verification {
        valid: missing.is_empty(),
        total_nodes: graph.word_count(),
        grounding_set_size: grounding.len(),
        closure_size: known.len(),
        missing,
    }
}

/// Resolves `words` against the graph and verifies them.
///
/// Words absent from the graph fail with
/// [`GraphError::InvalidGroundingSet`](groundset_core::GraphError::InvalidGroundingSet).
pub fn verify_words<'a, I>(graph: &DefinitionGraph, words: I) -> Result<Verification, SearchError>
where
    I: IntoIterator<Item = &'a str>,
{
    let grounding = graph.resolve_words(words)?;
    Ok(verify(graph, &grounding))
}
