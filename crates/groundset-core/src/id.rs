//! Dense word identifiers.
//!
//! Every word in a [`DefinitionGraph`](crate::graph::DefinitionGraph) gets a
//! `WordId` at construction time, assigned in adjacency-list declaration
//! order. All working state in the search algorithms is stored in arrays
//! indexed by `WordId`, so ids are contiguous in `0..word_count`.

use std::fmt;

use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

/// Stable word identifier. Maps to a petgraph `NodeIndex<u32>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WordId(pub u32);

impl WordId {
    /// Returns the id as an array index.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Bridge between WordId and petgraph's NodeIndex<u32>.

impl From<NodeIndex<u32>> for WordId {
    fn from(idx: NodeIndex<u32>) -> Self {
        WordId(idx.index() as u32)
    }
}

impl From<WordId> for NodeIndex<u32> {
    fn from(id: WordId) -> Self {
        NodeIndex::new(id.0 as usize)
    }
}
