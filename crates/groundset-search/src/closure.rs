//! Forward closure of a known set.
//!
//! Starting from a seed set, repeatedly learn any word whose every defining
//! word is already known, until nothing more can be learned. Each word keeps
//! a count of its still-unknown predecessors; learning a word decrements the
//! counts of its successors, and a successor joins the frontier exactly when
//! its count reaches zero. That makes one closure run O(V + E).
//!
//! The result is a function of the graph and the seed alone. A word enters
//! the known set precisely when its predecessor set is satisfied, so the
//! frontier order only changes the discovery order, never the closure.
//!
//! [`Propagator`] owns the working buffers and resets them on every run, so
//! the binary search and the sampling sweep can run thousands of closures
//! without reallocating.

use groundset_core::{DefinitionGraph, WordSet};

use crate::frontier::{Frontier, FrontierOrder};

/// Reusable closure engine.
#[derive(Debug, Clone)]
pub struct Propagator {
    /// Unknown-predecessor count per word.
    remaining: Vec<u32>,
    known: WordSet,
    frontier: Frontier,
}

impl Propagator {
    /// Creates a propagator with a FIFO frontier sized for `graph`.
    pub fn new(graph: &DefinitionGraph) -> Self {
        Propagator::with_order(graph, FrontierOrder::Queue)
    }

    pub fn with_order(graph: &DefinitionGraph, order: FrontierOrder) -> Self {
        Propagator {
            remaining: Vec::with_capacity(graph.word_count()),
            known: graph.empty_set(),
            frontier: Frontier::new(order),
        }
    }

    /// Computes the closure of `seed`, returning the known set.
    ///
    /// `seed` must be sized for `graph`. The returned set stays valid until
    /// the next run.
    pub fn run(&mut self, graph: &DefinitionGraph, seed: &WordSet) -> &WordSet {
        debug_assert_eq!(seed.capacity(), graph.word_count());
        self.reset(graph);

        for id in seed.iter() {
            self.known.insert(id);
        }
        // Seed words count as learned from outside: their successors lose
        // one unknown predecessor each.
        for id in seed.iter() {
            for succ in graph.successors(id) {
                self.remaining[succ.index()] -= 1;
            }
        }
        for id in graph.ids() {
            if self.remaining[id.index()] == 0 && !self.known.contains(id) {
                self.frontier.push(id);
            }
        }

        while let Some(id) = self.frontier.pop() {
            if !self.known.insert(id) {
                continue;
            }
            for succ in graph.successors(id) {
                let count = &mut self.remaining[succ.index()];
                *count -= 1;
                if *count == 0 && !self.known.contains(succ) {
                    self.frontier.push(succ);
                }
            }
        }

        &self.known
    }

    /// True when the closure of `seed` is the whole vocabulary.
    pub fn covers_all(&mut self, graph: &DefinitionGraph, seed: &WordSet) -> bool {
        self.run(graph, seed).is_full()
    }

    /// The known set of the last run.
    pub fn known(&self) -> &WordSet {
        &self.known
    }

    pub fn into_known(self) -> WordSet {
        self.known
    }

    fn reset(&mut self, graph: &DefinitionGraph) {
        if self.known.capacity() != graph.word_count() {
            self.known = graph.empty_set();
        } else {
            self.known.clear();
        }
        self.remaining.clear();
        self.remaining.extend(graph.ids().map(|id| graph.in_degree(id)));
        self.frontier.clear();
    }
}

/// The closure of `seed` in `graph`.
pub fn closure(graph: &DefinitionGraph, seed: &WordSet) -> WordSet {
    closure_with_order(graph, seed, FrontierOrder::Queue)
}

/// The closure of `seed`, draining the frontier in the given order.
pub fn closure_with_order(graph: &DefinitionGraph, seed: &WordSet, order: FrontierOrder) -> WordSet {
    let mut propagator = Propagator::with_order(graph, order);
    propagator.run(graph, seed);
    propagator.into_known()
}
