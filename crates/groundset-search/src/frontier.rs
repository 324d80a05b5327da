//! The frontier of knowable-but-unknown words.
//!
//! Both the closure propagator and the greedy builder drain a frontier. The
//! [`FrontierOrder`] decides which pending word is learned next: FIFO gives a
//! breadth-first sweep, LIFO a depth-first one. For closure the order never
//! changes the result; for the greedy builder it changes which words end up
//! being forced into the grounding set.

use std::collections::VecDeque;

use groundset_core::WordId;
use serde::{Deserialize, Serialize};

/// Processing order of the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrontierOrder {
    /// First in, first out (earliest discovered first).
    #[default]
    Queue,
    /// Last in, first out (most recently discovered first).
    Stack,
}

/// Pending words awaiting processing. May contain duplicates and words that
/// became known in the meantime; callers skip those on pop.
#[derive(Debug, Clone)]
pub struct Frontier {
    order: FrontierOrder,
    items: VecDeque<WordId>,
}

impl Frontier {
    pub fn new(order: FrontierOrder) -> Self {
        Frontier {
            order,
            items: VecDeque::new(),
        }
    }

    pub fn order(&self) -> FrontierOrder {
        self.order
    }

    #[inline]
    pub fn push(&mut self, id: WordId) {
        self.items.push_back(id);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<WordId> {
        match self.order {
            FrontierOrder::Queue => self.items.pop_front(),
            FrontierOrder::Stack => self.items.pop_back(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drops all pending words, keeping the allocation.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(frontier: &mut Frontier) -> Vec<u32> {
        std::iter::from_fn(|| frontier.pop()).map(|id| id.0).collect()
    }

    #[test]
    fn queue_is_fifo() {
        let mut f = Frontier::new(FrontierOrder::Queue);
        for i in 0..4 {
            f.push(WordId(i));
        }
        assert_eq!(f.len(), 4);
        assert_eq!(drain(&mut f), vec![0, 1, 2, 3]);
        assert!(f.is_empty());
    }

    #[test]
    fn stack_is_lifo() {
        let mut f = Frontier::new(FrontierOrder::Stack);
        for i in 0..4 {
            f.push(WordId(i));
        }
        assert_eq!(drain(&mut f), vec![3, 2, 1, 0]);
    }

    #[test]
    fn order_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&FrontierOrder::Queue).unwrap(), "\"queue\"");
        let order: FrontierOrder = serde_json::from_str("\"stack\"").unwrap();
        assert_eq!(order, FrontierOrder::Stack);
    }
}
