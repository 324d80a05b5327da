//! Words every grounding set must contain.
//!
//! A word is mandatory when nothing defines it (`no_predecessors`) or when
//! it appears in its own definition (`self_loop`). A self-looping word can
//! never become knowable through propagation, because one of its
//! predecessors is itself.

use groundset_core::{DefinitionGraph, WordId, WordSet};
use serde::{Deserialize, Serialize};

/// Why a word is mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MandatoryReason {
    NoPredecessors,
    SelfLoop,
}

impl MandatoryReason {
    pub fn as_str(self) -> &'static str {
        match self {
            MandatoryReason::NoPredecessors => "no_predecessors",
            MandatoryReason::SelfLoop => "self_loop",
        }
    }
}

/// A mandatory word together with every rule it satisfies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandatoryWord {
    pub word: String,
    pub reasons: Vec<MandatoryReason>,
}

/// The reasons `id` is mandatory; empty when it is not.
pub fn reasons(graph: &DefinitionGraph, id: WordId) -> Vec<MandatoryReason> {
    let mut out = Vec::new();
    if graph.in_degree(id) == 0 {
        out.push(MandatoryReason::NoPredecessors);
    }
    if graph.has_self_loop(id) {
        out.push(MandatoryReason::SelfLoop);
    }
    out
}

pub fn is_mandatory(graph: &DefinitionGraph, id: WordId) -> bool {
    graph.in_degree(id) == 0 || graph.has_self_loop(id)
}

/// Computes the mandatory set in a single pass over the words.
pub fn mandatory_set(graph: &DefinitionGraph) -> WordSet {
    let set = WordSet::from_ids(
        graph.word_count(),
        graph.ids().filter(|&id| is_mandatory(graph, id)),
    );
    tracing::info!(mandatory = set.len(), total = graph.word_count(), "computed mandatory set");
    set
}

/// Lists mandatory words with their reasons, sorted by word.
pub fn mandatory_words(graph: &DefinitionGraph) -> Vec<MandatoryWord> {
    let mut words: Vec<MandatoryWord> = graph
        .ids()
        .filter_map(|id| {
            let reasons = reasons(graph, id);
            (!reasons.is_empty()).then(|| MandatoryWord {
                word: graph.word(id).to_string(),
                reasons,
            })
        })
        .collect();
    words.sort_by(|a, b| a.word.cmp(&b.word));
    words
}
