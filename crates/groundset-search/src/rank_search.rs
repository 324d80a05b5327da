//! Smallest out-degree prefix that grounds the whole graph.
//!
//! Non-mandatory words are ranked by static out-degree, highest first, with
//! ties kept in [`WordId`] order. The search looks for the smallest `k` such
//! that the mandatory set plus the top `k` ranked words has full closure.
//!
//! # Monotonicity assumption
//!
//! The binary search assumes success is monotone in `k`: if a prefix works,
//! every longer prefix works too. Closure itself is monotone in the seed, so
//! a longer prefix can never learn less, which makes the assumption hold for
//! a fixed ranking. What is *not* guaranteed is that the result is minimal
//! across rankings: the answer is only the best prefix of this one order.

use groundset_core::{DefinitionGraph, GraphError, WordId, WordSet};
use serde::{Deserialize, Serialize};

use crate::closure::Propagator;
use crate::error::SearchError;

/// One closure test performed by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    pub k: usize,
    pub grounding_set_size: usize,
    pub success: bool,
}

/// Result of the prefix search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankSearchResult {
    /// Number of ranked words added to the mandatory set.
    pub k: usize,
    pub grounding_set_size: usize,
    /// Sorted.
    pub grounding_set: Vec<String>,
    /// Every probe in the order it was run.
    #[serde(default)]
    pub probes: Vec<Probe>,
}

/// Non-mandatory words by descending static out-degree, ties by id.
pub fn rank_by_out_degree(graph: &DefinitionGraph, mandatory: &WordSet) -> Vec<WordId> {
    let mut ranked: Vec<WordId> = graph.ids().filter(|&id| !mandatory.contains(id)).collect();
    // Stable sort keeps ascending id order within equal degrees.
    ranked.sort_by_key(|&id| std::cmp::Reverse(graph.out_degree(id)));
    ranked
}

/// Binary-searches the smallest grounding prefix of the out-degree ranking.
pub fn search(graph: &DefinitionGraph, mandatory: &WordSet) -> Result<RankSearchResult, SearchError> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph.into());
    }

    let ranked = rank_by_out_degree(graph, mandatory);
    tracing::info!(
        candidates = ranked.len(),
        mandatory = mandatory.len(),
        "running binary search over top-k out-degree words"
    );

    let mut propagator = Propagator::new(graph);
    let mut probes = Vec::new();
    let (mut low, mut high) = (0usize, ranked.len());

    while low < high {
        let mid = low + (high - low) / 2;
        let seed = prefix_set(mandatory, &ranked, mid);
        let success = propagator.covers_all(graph, &seed);
        tracing::info!(k = mid, grounding_set_size = seed.len(), success, "probe");
        probes.push(Probe {
            k: mid,
            grounding_set_size: seed.len(),
            success,
        });
        if success {
            high = mid;
        } else {
            low = mid + 1;
        }
    }

    // `low` is either a probed success or the full ranking, whose seed is
    // the whole vocabulary.
    let k = low;
    let grounding = prefix_set(mandatory, &ranked, k);
    tracing::info!(k, grounding_set_size = grounding.len(), "rank search finished");

    Ok(RankSearchResult {
        k,
        grounding_set_size: grounding.len(),
        grounding_set: graph.sorted_words(&grounding),
        probes,
    })
}

/// `mandatory` plus the first `k` ranked words.
pub fn prefix_set(mandatory: &WordSet, ranked: &[WordId], k: usize) -> WordSet {
    let mut seed = mandatory.clone();
    for &id in &ranked[..k] {
        seed.insert(id);
    }
    seed
}
