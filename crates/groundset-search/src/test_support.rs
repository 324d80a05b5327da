//! Graph builders shared by the unit tests.

use groundset_core::{AdjacencyList, DanglingWords, DefinitionGraph, WordSet};

/// Builds a graph from `(word, defining words)` pairs.
pub fn graph(pairs: &[(&str, &[&str])]) -> DefinitionGraph {
    let adj: AdjacencyList = pairs
        .iter()
        .map(|(w, d)| (w.to_string(), d.iter().map(|s| s.to_string()).collect::<Vec<_>>()))
        .collect();
    DefinitionGraph::from_adjacency(&adj, DanglingWords::Reject).unwrap()
}

/// Resolves words that are known to exist.
pub fn set(graph: &DefinitionGraph, words: &[&str]) -> WordSet {
    graph.resolve_words(words.iter().copied()).unwrap()
}
