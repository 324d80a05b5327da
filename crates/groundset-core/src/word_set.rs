//! Dense membership sets over [`WordId`]s.
//!
//! A [`WordSet`] is sized to the vocabulary of one graph and stores one flag
//! per word, so membership tests and inserts are plain array accesses. Sets
//! from different graphs must not be mixed.

use crate::id::WordId;

/// A set of words of a single graph, indexed by [`WordId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSet {
    members: Vec<bool>,
    len: usize,
}

impl WordSet {
    /// Creates an empty set able to hold words `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        WordSet {
            members: vec![false; capacity],
            len: 0,
        }
    }

    /// Creates a set containing every word `0..capacity`.
    pub fn full(capacity: usize) -> Self {
        WordSet {
            members: vec![true; capacity],
            len: capacity,
        }
    }

    /// Builds a set from an iterator of ids. Ids outside the capacity panic,
    /// as they do for [`insert`](Self::insert).
    pub fn from_ids(capacity: usize, ids: impl IntoIterator<Item = WordId>) -> Self {
        let mut set = WordSet::with_capacity(capacity);
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// Number of words the set can address.
    pub fn capacity(&self) -> usize {
        self.members.len()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when every addressable word is a member.
    pub fn is_full(&self) -> bool {
        self.len == self.members.len()
    }

    #[inline]
    pub fn contains(&self, id: WordId) -> bool {
        self.members[id.index()]
    }

    /// Inserts `id`, returning `true` if it was not already present.
    #[inline]
    pub fn insert(&mut self, id: WordId) -> bool {
        let slot = &mut self.members[id.index()];
        if *slot {
            false
        } else {
            *slot = true;
            self.len += 1;
            true
        }
    }

    /// Removes `id`, returning `true` if it was present.
    pub fn remove(&mut self, id: WordId) -> bool {
        let slot = &mut self.members[id.index()];
        if *slot {
            *slot = false;
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Removes every member, keeping the capacity.
    pub fn clear(&mut self) {
        self.members.iter_mut().for_each(|m| *m = false);
        self.len = 0;
    }

    /// Iterates members in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = WordId> + '_ {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, &m)| m)
            .map(|(i, _)| WordId(i as u32))
    }

    /// Adds every member of `other` to `self`.
    pub fn union_with(&mut self, other: &WordSet) {
        debug_assert_eq!(self.capacity(), other.capacity());
        for id in other.iter() {
            self.insert(id);
        }
    }

    /// Returns the members of `self` that are not in `other`.
    pub fn difference(&self, other: &WordSet) -> WordSet {
        debug_assert_eq!(self.capacity(), other.capacity());
        let mut out = WordSet::with_capacity(self.capacity());
        for id in self.iter().filter(|&id| !other.contains(id)) {
            out.insert(id);
        }
        out
    }

    /// True when every member of `self` is also in `other`.
    pub fn is_subset(&self, other: &WordSet) -> bool {
        self.iter().all(|id| other.contains(id))
    }

    /// Returns the words in `0..capacity` that are not members.
    pub fn complement(&self) -> WordSet {
        let members: Vec<bool> = self.members.iter().map(|&m| !m).collect();
        let len = self.members.len() - self.len;
        WordSet { members, len }
    }
}
