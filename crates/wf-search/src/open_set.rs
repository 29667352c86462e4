//! Open set: discovered-but-unexpanded nodes, ordered by `f = g + h`.
//!
//! A binary heap replaces a full re-sort per selection, so choosing the next
//! node is O(log n).  Every entry carries an insertion sequence number; the
//! configured [`TieBreak`] turns that into a deterministic secondary key.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use wf_core::NodeId;

use crate::TieBreak;

#[derive(Copy, Clone, Debug)]
struct Entry {
    f:     f32,
    /// Secondary key: larger wins.  Derived from the insertion sequence
    /// according to the tie-break policy.
    order: u64,
    node:  NodeId,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on f (flipped for std's max-heap), then larger `order`.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| self.order.cmp(&other.order))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue of node references keyed on `f`.
#[derive(Debug)]
pub struct OpenSet {
    heap:      BinaryHeap<Entry>,
    next_seq:  u64,
    tie_break: TieBreak,
}

impl OpenSet {
    pub fn new(tie_break: TieBreak) -> Self {
        Self { heap: BinaryHeap::new(), next_seq: 0, tie_break }
    }

    /// Insert `node` with priority `f`.
    pub fn push(&mut self, node: NodeId, f: f32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        let order = match self.tie_break {
            TieBreak::LastInserted  => seq,
            TieBreak::FirstInserted => u64::MAX - seq,
        };
        self.heap.push(Entry { f, order, node });
    }

    /// Remove and return the node with the lowest `f`, with its `f`.
    pub fn pop(&mut self) -> Option<(NodeId, f32)> {
        self.heap.pop().map(|e| (e.node, e.f))
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
