//! DefinitionGraph: the immutable word graph every analysis runs on.
//!
//! An edge `a -> b` means "`a` is used to define `b`". The graph is built
//! once from an [`AdjacencyList`] and never mutated afterwards, so it can be
//! shared freely between concurrent simulations.
//!
//! # Layout
//!
//! Words live in a petgraph `Graph` whose node indices double as
//! [`WordId`]s, assigned densely in declaration order. In- and out-degrees
//! are precomputed so degree queries are O(1); predecessor and successor
//! iteration walk petgraph's adjacency lists.
//!
//! Self-loops (a word used in its own definition) are kept as ordinary
//! edges. Duplicate defining words collapse into a single edge.

use std::collections::HashMap;

use petgraph::graph::{Graph, NodeIndex};
use petgraph::{Directed, Direction};

use crate::adjacency::AdjacencyList;
use crate::error::GraphError;
use crate::id::WordId;
use crate::word_set::WordSet;

/// What to do with a defining word that is not declared as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DanglingWords {
    /// Fail with [`GraphError::MalformedGraph`].
    #[default]
    Reject,
    /// Add the word as a new node with no definition of its own.
    Insert,
}

/// The definition graph over a vocabulary.
#[derive(Debug, Clone)]
pub struct DefinitionGraph {
    graph: Graph<String, (), Directed, u32>,
    lookup: HashMap<String, WordId>,
    in_degree: Vec<u32>,
    out_degree: Vec<u32>,
}

impl DefinitionGraph {
    /// Builds the graph from predecessor lists.
    ///
    /// Declared words receive ids `0..adj.len()` in declaration order. With
    /// [`DanglingWords::Insert`], undeclared defining words are appended in
    /// order of first mention.
    pub fn from_adjacency(adj: &AdjacencyList, dangling: DanglingWords) -> Result<Self, GraphError> {
        if adj.len() > u32::MAX as usize {
            return Err(GraphError::TooManyWords { count: adj.len() });
        }

        let mut graph = Graph::<String, (), Directed, u32>::with_capacity(adj.len(), 0);
        let mut lookup: HashMap<String, WordId> = HashMap::with_capacity(adj.len());

        for (word, _) in adj.iter() {
            let idx = graph.add_node(word.to_string());
            lookup.insert(word.to_string(), WordId::from(idx));
        }

        let mut preds: Vec<WordId> = Vec::new();
        for (word, defining) in adj.iter() {
            let target = lookup[word];
            preds.clear();
            for def in defining {
                let pred = match lookup.get(def.as_str()) {
                    Some(&id) => id,
                    None => match dangling {
                        DanglingWords::Reject => {
                            return Err(GraphError::MalformedGraph {
                                word: word.to_string(),
                                missing: def.clone(),
                            });
                        }
                        DanglingWords::Insert => {
                            if graph.node_count() == u32::MAX as usize {
                                return Err(GraphError::TooManyWords {
                                    count: graph.node_count() + 1,
                                });
                            }
                            let id = WordId::from(graph.add_node(def.clone()));
                            lookup.insert(def.clone(), id);
                            id
                        }
                    },
                };
                preds.push(pred);
            }
            preds.sort_unstable();
            preds.dedup();
            for &pred in &preds {
                graph.add_edge(pred.into(), target.into(), ());
            }
        }

        let mut in_degree = vec![0u32; graph.node_count()];
        let mut out_degree = vec![0u32; graph.node_count()];
        for edge in graph.raw_edges() {
            out_degree[edge.source().index()] += 1;
            in_degree[edge.target().index()] += 1;
        }

        Ok(DefinitionGraph {
            graph,
            lookup,
            in_degree,
            out_degree,
        })
    }

    // -----------------------------------------------------------------------
    // Size queries
    // -----------------------------------------------------------------------

    /// Number of words (|V|).
    pub fn word_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct definition edges (|E|), self-loops included.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    // -----------------------------------------------------------------------
    // Word lookup
    // -----------------------------------------------------------------------

    /// The word behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this graph.
    pub fn word(&self, id: WordId) -> &str {
        &self.graph[NodeIndex::<u32>::from(id)]
    }

    /// The id of `word`, if it is part of the vocabulary.
    pub fn id_of(&self, word: &str) -> Option<WordId> {
        self.lookup.get(word).copied()
    }

    /// All word ids in ascending order.
    pub fn ids(&self) -> impl ExactSizeIterator<Item = WordId> + '_ {
        self.graph.node_indices().map(WordId::from)
    }

    /// All words in id order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Words used in the definition of `id`.
    pub fn predecessors(&self, id: WordId) -> impl Iterator<Item = WordId> + '_ {
        self.graph
            .neighbors_directed(id.into(), Direction::Incoming)
            .map(WordId::from)
    }

    /// Words whose definitions use `id`.
    pub fn successors(&self, id: WordId) -> impl Iterator<Item = WordId> + '_ {
        self.graph
            .neighbors_directed(id.into(), Direction::Outgoing)
            .map(WordId::from)
    }

    #[inline]
    pub fn in_degree(&self, id: WordId) -> u32 {
        self.in_degree[id.index()]
    }

    #[inline]
    pub fn out_degree(&self, id: WordId) -> u32 {
        self.out_degree[id.index()]
    }

    /// True when `id` appears in its own definition.
    pub fn has_self_loop(&self, id: WordId) -> bool {
        self.graph.contains_edge(id.into(), id.into())
    }

    // -----------------------------------------------------------------------
    // Word sets
    // -----------------------------------------------------------------------

    /// An empty set sized for this graph.
    pub fn empty_set(&self) -> WordSet {
        WordSet::with_capacity(self.word_count())
    }

    /// The set of every word in the graph.
    pub fn full_set(&self) -> WordSet {
        WordSet::full(self.word_count())
    }

    /// Resolves words to a set, failing with every unknown word listed.
    pub fn resolve_words<'a, I>(&self, words: I) -> Result<WordSet, GraphError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = self.empty_set();
        let mut unknown = Vec::new();
        for word in words {
            match self.id_of(word) {
                Some(id) => {
                    set.insert(id);
                }
                None => unknown.push(word.to_string()),
            }
        }
        if unknown.is_empty() {
            Ok(set)
        } else {
            unknown.sort();
            unknown.dedup();
            Err(GraphError::InvalidGroundingSet { unknown })
        }
    }

    /// The members of `set` as words, sorted lexicographically.
    pub fn sorted_words(&self, set: &WordSet) -> Vec<String> {
        let mut words: Vec<String> = set.iter().map(|id| self.word(id).to_string()).collect();
        words.sort();
        words
    }
}
