//! The predecessor-list interchange form of a definition graph.
//!
//! An [`AdjacencyList`] maps each word to the words used in its definition,
//! exactly as the dictionary extraction stage writes it:
//!
//! ```json
//! { "cat": ["small", "animal"], "small": ["size"], "size": [] }
//! ```
//!
//! Declaration order is preserved and becomes [`WordId`](crate::id::WordId)
//! order when the graph is built.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from a word to its defining words.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AdjacencyList(IndexMap<String, Vec<String>>);

impl AdjacencyList {
    pub fn new() -> Self {
        AdjacencyList(IndexMap::new())
    }

    /// Declares `word` with the given defining words, replacing any earlier
    /// declaration but keeping its original position.
    pub fn insert(&mut self, word: impl Into<String>, defining: Vec<String>) {
        self.0.insert(word.into(), defining);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Defining words of `word`, if declared.
    pub fn get(&self, word: &str) -> Option<&[String]> {
        self.0.get(word).map(Vec::as_slice)
    }

    /// Iterates `(word, defining words)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(w, d)| (w.as_str(), d.as_slice()))
    }
}

impl<W, D> FromIterator<(W, D)> for AdjacencyList
where
    W: Into<String>,
    D: IntoIterator,
    D::Item: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (W, D)>>(iter: I) -> Self {
        AdjacencyList(
            iter.into_iter()
                .map(|(w, d)| (w.into(), d.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}
