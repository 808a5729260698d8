//! Best-first open list with duplicate suppression.
//!
//! Uses `BTreeSet`-based closed set (not `HashSet`) for deterministic
//! iteration order at serialization boundaries.

use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use crate::node::{NodeId, OpenKey};

/// An open-list entry wrapping a node id with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<OpenKey>` to get min-heap
/// behavior (lowest estimate first, oldest insertion on ties).
#[derive(Debug)]
struct OpenEntry {
    key: Reverse<OpenKey>,
    node_id: NodeId,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first open-list manager.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the best node id
/// - A `BTreeSet<String>` of closed state fingerprints
pub struct Frontier {
    heap: BinaryHeap<OpenEntry>,
    closed: BTreeSet<String>,
    high_water: u64,
}

impl Frontier {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            closed: BTreeSet::new(),
            high_water: 0,
        }
    }

    /// Push a node onto the open list and close its fingerprint.
    ///
    /// Returns `false` if the fingerprint was already closed (node not added).
    pub fn push(&mut self, key: OpenKey, node_id: NodeId, fingerprint: &str) -> bool {
        if !self.closed.insert(fingerprint.to_string()) {
            return false;
        }
        self.heap.push(OpenEntry {
            key: Reverse(key),
            node_id,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        true
    }

    /// Pop the best (lowest estimate, FIFO on ties) node id.
    #[must_use]
    pub fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|e| e.node_id)
    }

    /// Check if a fingerprint has been closed.
    #[must_use]
    pub fn is_closed(&self, fingerprint: &str) -> bool {
        self.closed.contains(fingerprint)
    }

    /// Number of closed fingerprints.
    #[must_use]
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Current open-list size.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the open list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of open-list size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Prune the open list to at most `max_size` entries.
    ///
    /// Keeps the best nodes by open-key ordering. Returns the node ids of
    /// pruned entries. Pruned fingerprints stay closed.
    pub fn prune_to(&mut self, max_size: usize) -> Vec<NodeId> {
        if self.heap.len() <= max_size {
            return Vec::new();
        }

        let mut entries: Vec<OpenEntry> = self.heap.drain().collect();
        // Sorting ascending by the raw OpenKey puts the lowest estimates
        // first; everything past max_size is discarded.
        entries.sort_by(|a, b| a.key.0.cmp(&b.key.0));

        let pruned_ids: Vec<NodeId> = entries[max_size..].iter().map(|e| e.node_id).collect();

        entries.truncate(max_size);
        self.heap = entries.into_iter().collect();

        pruned_ids
    }
}

impl Default for Frontier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(estimate: u64, insertion: u64) -> OpenKey {
        OpenKey {
            estimate,
            insertion,
        }
    }

    #[test]
    fn pop_returns_lowest_estimate_first() {
        let mut frontier = Frontier::new();
        frontier.push(key(10, 0), 0, "fp-0");
        frontier.push(key(5, 1), 1, "fp-1");
        frontier.push(key(15, 2), 2, "fp-2");

        assert_eq!(frontier.pop(), Some(1));
    }

    #[test]
    fn ties_break_in_insertion_order() {
        let mut frontier = Frontier::new();
        frontier.push(key(3, 0), 7, "fp-7");
        frontier.push(key(3, 1), 8, "fp-8");
        frontier.push(key(3, 2), 9, "fp-9");

        assert_eq!(frontier.pop(), Some(7));
        assert_eq!(frontier.pop(), Some(8));
        assert_eq!(frontier.pop(), Some(9));
    }

    #[test]
    fn duplicate_fingerprint_rejected() {
        let mut frontier = Frontier::new();
        assert!(frontier.push(key(1, 0), 0, "fp-same"));
        assert!(!frontier.push(key(2, 1), 1, "fp-same"));
        assert_eq!(frontier.len(), 1);
    }

    #[test]
    fn prune_keeps_best_nodes() {
        let mut frontier = Frontier::new();
        frontier.push(key(10, 0), 0, "fp-0");
        frontier.push(key(5, 1), 1, "fp-1");
        frontier.push(key(1, 2), 2, "fp-2");
        frontier.push(key(20, 3), 3, "fp-3");

        let pruned = frontier.prune_to(2);
        assert_eq!(pruned, vec![0, 3]);
        assert_eq!(frontier.len(), 2);
        assert_eq!(frontier.pop(), Some(2));
        assert_eq!(frontier.pop(), Some(1));
    }

    #[test]
    fn high_water_does_not_decrease_on_pop() {
        let mut frontier = Frontier::new();
        frontier.push(key(1, 0), 0, "fp-0");
        frontier.push(key(2, 1), 1, "fp-1");
        frontier.push(key(3, 2), 2, "fp-2");
        assert_eq!(frontier.high_water(), 3);

        let _ = frontier.pop();
        assert_eq!(frontier.high_water(), 3);
    }

}
