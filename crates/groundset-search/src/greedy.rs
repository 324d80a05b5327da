//! Greedy construction of a grounding set.
//!
//! The builder runs the same propagation as [`closure`](crate::closure), but
//! instead of stopping when the frontier runs dry it forces one more word
//! into the grounding set, chosen by a [`Backoff`] policy, and keeps going
//! until every word is known. Every iteration learns exactly one word, so
//! the loop always terminates.
//!
//! Word states only move forward: unknown, then pending on the frontier,
//! then known. A forced word skips the frontier and is learned directly.
//!
//! Alongside the unknown-predecessor counts the builder tracks, per word,
//! how many of its successors are still unknown. That count is what the
//! `max_out_degree` backoff ranks by.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use groundset_core::{DefinitionGraph, GraphError, WordId, WordSet};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::frontier::{Frontier, FrontierOrder};
use crate::mandatory::mandatory_set;

/// Learned-word interval between progress events.
const PROGRESS_INTERVAL: usize = 1 << 16;

/// Starting grounding set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InitialGrounding {
    /// Start from nothing.
    Empty,
    /// Start from the mandatory set.
    #[default]
    Mandatory,
}

/// Rule for forcing a word when propagation stalls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backoff {
    /// Uniformly random unknown word.
    Random,
    /// Unknown word with the most still-unknown successors; ties go to the
    /// lowest [`WordId`].
    #[default]
    MaxOutDegree,
}

/// Greedy builder settings. Defaults: mandatory start, FIFO frontier,
/// `max_out_degree` backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GreedyConfig {
    pub initial: InitialGrounding,
    pub order: FrontierOrder,
    pub backoff: Backoff,
}

/// Report of one greedy run, in the interchange format of the result files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingResult {
    pub total_nodes: usize,
    pub initial_grounding: InitialGrounding,
    pub strategy: FrontierOrder,
    pub backoff: Backoff,
    pub grounding_set_size: usize,
    /// Sorted.
    pub grounding_set: Vec<String>,
    /// Grounding words beyond the mandatory set, sorted. Empty-start runs
    /// report every grounding word here.
    pub extra_grounding_set: Vec<String>,
}

/// Raw outcome of a greedy run, as word sets.
#[derive(Debug, Clone)]
pub struct GreedyOutcome {
    pub grounding: WordSet,
    /// The starting set (empty for [`InitialGrounding::Empty`]).
    pub initial: WordSet,
    /// Words forced by the backoff, in the order they were forced.
    pub forced: Vec<WordId>,
}

impl GreedyOutcome {
    /// Grounding words that were not part of the starting set.
    pub fn extra(&self) -> WordSet {
        self.grounding.difference(&self.initial)
    }

    pub fn into_result(self, graph: &DefinitionGraph, config: &GreedyConfig) -> GroundingResult {
        GroundingResult {
            total_nodes: graph.word_count(),
            initial_grounding: config.initial,
            strategy: config.order,
            backoff: config.backoff,
            grounding_set_size: self.grounding.len(),
            grounding_set: graph.sorted_words(&self.grounding),
            extra_grounding_set: graph.sorted_words(&self.extra()),
        }
    }
}

/// Builds a grounding set and returns its report.
///
/// `rng` is only consulted by [`Backoff::Random`].
pub fn build<R: Rng + ?Sized>(
    graph: &DefinitionGraph,
    config: &GreedyConfig,
    rng: &mut R,
) -> Result<GroundingResult, SearchError> {
    let outcome = run(graph, config, rng)?;
    Ok(outcome.into_result(graph, config))
}

/// Builds a grounding set, returning the raw word sets.
pub fn run<R: Rng + ?Sized>(
    graph: &DefinitionGraph,
    config: &GreedyConfig,
    rng: &mut R,
) -> Result<GreedyOutcome, SearchError> {
    if graph.is_empty() {
        return Err(GraphError::EmptyGraph.into());
    }

    let initial = match config.initial {
        InitialGrounding::Empty => graph.empty_set(),
        InitialGrounding::Mandatory => mandatory_set(graph),
    };
    tracing::info!(
        initial = ?config.initial,
        strategy = ?config.order,
        backoff = ?config.backoff,
        seed_size = initial.len(),
        "starting greedy grounding"
    );

    let mut state = GreedyState::new(graph, config);
    let mut grounding = initial.clone();
    let mut forced = Vec::new();

    for id in initial.iter() {
        state.mark_known(id);
    }
    for id in initial.iter() {
        state.propagate(graph, id);
    }
    for id in graph.ids() {
        if state.remaining_pred[id.index()] == 0 && !state.known.contains(id) {
            state.frontier.push(id);
        }
    }

    while !state.unknown.is_empty() {
        let current = match state.frontier.pop() {
            Some(id) if state.known.contains(id) => continue,
            Some(id) => id,
            None => {
                let id = state
                    .pick_backoff(config.backoff, &mut *rng)
                    .ok_or_else(|| SearchError::Internal {
                        message: "backoff found no unknown word while words remain unknown"
                            .to_string(),
                    })?;
                tracing::debug!(
                    word = graph.word(id),
                    remaining_successors = state.remaining_succ[id.index()],
                    unknown = state.unknown.len(),
                    "forcing grounding word"
                );
                grounding.insert(id);
                forced.push(id);
                id
            }
        };

        state.mark_known(current);
        state.propagate(graph, current);

        let learned = state.known.len();
        if learned % PROGRESS_INTERVAL == 0 {
            tracing::debug!(known = learned, total = graph.word_count(), "greedy progress");
        }
    }

    tracing::info!(
        grounding_set_size = grounding.len(),
        forced = forced.len(),
        total = graph.word_count(),
        "greedy grounding finished"
    );

    Ok(GreedyOutcome {
        grounding,
        initial,
        forced,
    })
}

/// Per-run working state of the greedy builder.
struct GreedyState {
    known: WordSet,
    unknown: UnknownPool,
    /// Unknown-predecessor count per word.
    remaining_pred: Vec<u32>,
    /// Unknown-successor count per word.
    remaining_succ: Vec<u32>,
    frontier: Frontier,
    /// Lazy max-heap for `max_out_degree`; absent for `random`.
    by_out_degree: Option<BinaryHeap<(u32, Reverse<WordId>)>>,
}

impl GreedyState {
    fn new(graph: &DefinitionGraph, config: &GreedyConfig) -> Self {
        let remaining_pred: Vec<u32> = graph.ids().map(|id| graph.in_degree(id)).collect();
        let remaining_succ: Vec<u32> = graph.ids().map(|id| graph.out_degree(id)).collect();
        let by_out_degree = match config.backoff {
            Backoff::MaxOutDegree => Some(
                graph
                    .ids()
                    .map(|id| (remaining_succ[id.index()], Reverse(id)))
                    .collect(),
            ),
            Backoff::Random => None,
        };
        GreedyState {
            known: graph.empty_set(),
            unknown: UnknownPool::all(graph.word_count()),
            remaining_pred,
            remaining_succ,
            frontier: Frontier::new(config.order),
            by_out_degree,
        }
    }

    fn mark_known(&mut self, id: WordId) {
        self.known.insert(id);
        self.unknown.remove(id);
    }

    /// Updates both count arrays for a newly learned word and queues any
    /// successor that just became knowable.
    fn propagate(&mut self, graph: &DefinitionGraph, id: WordId) {
        for succ in graph.successors(id) {
            let count = &mut self.remaining_pred[succ.index()];
            *count -= 1;
            if *count == 0 && !self.known.contains(succ) {
                self.frontier.push(succ);
            }
        }
        for pred in graph.predecessors(id) {
            self.remaining_succ[pred.index()] -= 1;
        }
    }

    fn pick_backoff<R: Rng + ?Sized>(&mut self, backoff: Backoff, rng: &mut R) -> Option<WordId> {
        match backoff {
            Backoff::Random => self.unknown.choose(rng),
            Backoff::MaxOutDegree => self.pop_max_out_degree(),
        }
    }

    /// Pops the unknown word with the largest current unknown-successor
    /// count. Heap keys may be stale: counts only ever decrease, so a popped
    /// entry whose key no longer matches is pushed back with the current
    /// count and the search continues.
    fn pop_max_out_degree(&mut self) -> Option<WordId> {
        let heap = self.by_out_degree.as_mut()?;
        while let Some((count, Reverse(id))) = heap.pop() {
            if self.known.contains(id) {
                continue;
            }
            let current = self.remaining_succ[id.index()];
            if current == count {
                return Some(id);
            }
            heap.push((current, Reverse(id)));
        }
        None
    }
}

/// Unknown words with O(1) removal and uniform sampling.
struct UnknownPool {
    items: Vec<WordId>,
    /// Position of each word in `items`, `ABSENT` once removed.
    position: Vec<u32>,
}

impl UnknownPool {
    const ABSENT: u32 = u32::MAX;

    fn all(count: usize) -> Self {
        UnknownPool {
            items: (0..count as u32).map(WordId).collect(),
            position: (0..count as u32).collect(),
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn remove(&mut self, id: WordId) {
        let pos = self.position[id.index()];
        if pos == Self::ABSENT {
            return;
        }
        self.items.swap_remove(pos as usize);
        if let Some(&moved) = self.items.get(pos as usize) {
            self.position[moved.index()] = pos;
        }
        self.position[id.index()] = Self::ABSENT;
    }

    fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<WordId> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items[rng.gen_range(0..self.items.len())])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::closure;
    use crate::test_support::graph;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    /// Two hubs: `h` defines five words, `g` defines two. A 2-cycle
    /// between them means one of them has to be forced.
    fn hub_graph() -> DefinitionGraph {
        graph(&[
            ("h", &["g"]),
            ("g", &["h"]),
            ("a1", &["h"]),
            ("a2", &["h"]),
            ("a3", &["h"]),
            ("a4", &["h"]),
            ("b1", &["g"]),
        ])
    }

    #[test]
    fn scenario_mandatory_start_needs_no_backoff() {
        let g = graph(&[("a", &[]), ("b", &["a"]), ("c", &["a", "b"]), ("d", &["d"])]);
        let outcome = run(&g, &GreedyConfig::default(), &mut rng()).unwrap();
        assert!(outcome.forced.is_empty());
        assert_eq!(g.sorted_words(&outcome.grounding), vec!["a", "d"]);
        assert!(outcome.extra().is_empty());
    }

    #[test]
    fn max_out_degree_forces_the_busiest_hub() {
        let g = hub_graph();
        let outcome = run(&g, &GreedyConfig::default(), &mut rng()).unwrap();
        assert_eq!(g.sorted_words(&outcome.grounding), vec!["h"]);
        assert_eq!(outcome.forced, vec![g.id_of("h").unwrap()]);
    }

    #[test]
    fn max_out_degree_ties_go_to_lowest_id() {
        let g = graph(&[("x", &["y"]), ("y", &["x"])]);
        let outcome = run(&g, &GreedyConfig::default(), &mut rng()).unwrap();
        assert_eq!(g.sorted_words(&outcome.grounding), vec!["x"]);
    }

    #[test]
    fn backoff_uses_current_counts_not_static_degree() {
        // `u` and `w` both have static out-degree 2 and `u` comes first. By
        // the second stall `h` is known, so `u` has one unknown successor
        // left while `w` still has two.
        let g = graph(&[
            ("h", &["k", "u"]),
            ("k", &["h"]),
            ("a1", &["h"]),
            ("a2", &["h"]),
            ("a3", &["h"]),
            ("u", &["w"]),
            ("w", &["u"]),
            ("z1", &["w"]),
        ]);
        let outcome = run(&g, &GreedyConfig::default(), &mut rng()).unwrap();
        assert_eq!(
            outcome.forced,
            vec![g.id_of("h").unwrap(), g.id_of("w").unwrap()]
        );
        assert!(closure(&g, &outcome.grounding).is_full());
    }

    #[test]
    fn empty_start_learns_undefined_words_for_free() {
        let g = graph(&[("a", &[]), ("b", &["a"]), ("s", &["s"])]);
        let config = GreedyConfig {
            initial: InitialGrounding::Empty,
            ..GreedyConfig::default()
        };
        let result = build(&g, &config, &mut rng()).unwrap();
        assert_eq!(result.grounding_set, vec!["s"]);
        assert_eq!(result.extra_grounding_set, vec!["s"]);
        assert_eq!(result.total_nodes, 3);
    }

    #[test]
    fn every_configuration_yields_a_valid_grounding_set() {
        let g = graph(&[
            ("a", &[]),
            ("b", &["c"]),
            ("c", &["d"]),
            ("d", &["b"]),
            ("e", &["b", "a"]),
            ("f", &["f"]),
            ("g", &["h", "e"]),
            ("h", &["g"]),
        ]);
        for initial in [InitialGrounding::Empty, InitialGrounding::Mandatory] {
            for order in [FrontierOrder::Queue, FrontierOrder::Stack] {
                for backoff in [Backoff::Random, Backoff::MaxOutDegree] {
                    let config = GreedyConfig {
                        initial,
                        order,
                        backoff,
                    };
                    let outcome = run(&g, &config, &mut rng()).unwrap();
                    assert!(
                        closure(&g, &outcome.grounding).is_full(),
                        "{config:?} produced an incomplete grounding set"
                    );
                    assert!(outcome.initial.is_subset(&outcome.grounding));
                    assert_eq!(
                        outcome.grounding.len(),
                        outcome.initial.len() + outcome.forced.len()
                    );
                }
            }
        }
    }

    #[test]
    fn random_backoff_is_reproducible() {
        let g = hub_graph();
        let config = GreedyConfig {
            backoff: Backoff::Random,
            ..GreedyConfig::default()
        };
        let first = build(&g, &config, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let second = build(&g, &config, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn result_serializes_with_interchange_field_names() {
        let g = hub_graph();
        let result = build(&g, &GreedyConfig::default(), &mut rng()).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_nodes"], 7);
        assert_eq!(json["initial_grounding"], "mandatory");
        assert_eq!(json["strategy"], "queue");
        assert_eq!(json["backoff"], "max_out_degree");
        assert_eq!(json["grounding_set_size"], 1);
        assert_eq!(json["grounding_set"], serde_json::json!(["h"]));
        assert_eq!(json["extra_grounding_set"], serde_json::json!(["h"]));
    }

    #[test]
    fn empty_graph_is_rejected() {
        let g = graph(&[]);
        let err = run(&g, &GreedyConfig::default(), &mut rng()).unwrap_err();
        assert!(matches!(err, SearchError::Graph(GraphError::EmptyGraph)));
    }

    #[test]
    fn unknown_pool_swap_remove_keeps_positions() {
        let mut pool = UnknownPool::all(4);
        pool.remove(WordId(0));
        pool.remove(WordId(0));
        assert_eq!(pool.len(), 3);
        pool.remove(WordId(3));
        pool.remove(WordId(1));
        assert_eq!(pool.items, vec![WordId(2)]);
        pool.remove(WordId(2));
        assert!(pool.is_empty());
        assert!(pool.choose(&mut rng()).is_none());
    }
}
