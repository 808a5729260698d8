//! Search nodes and the open-list ordering key.

use std::collections::BTreeSet;

use strider_kernel::model::{FactId, OperatorId};

/// Index of a node within the engine's node arena.
pub type NodeId = usize;

/// A state reached during search, stored in the engine's node arena.
///
/// Nodes address each other by arena index: the chain of `parent` links from
/// a goal node back to the root reconstructs the plan (reversed). Nodes are
/// immutable once created.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// This node's arena index.
    pub id: NodeId,
    /// Parent arena index (`None` for the root).
    pub parent: Option<NodeId>,
    /// Index into the engine's live operator list of the operator that
    /// produced this node (`None` for the root).
    pub operator: Option<OperatorId>,
    /// The facts true in this state.
    pub state: BTreeSet<FactId>,
    /// Path length from the root (root = 0).
    pub depth: u64,
}

/// The open-list ordering key: ascending heuristic estimate, ties broken by
/// strict first-in-first-out insertion order.
///
/// FIFO tie-breaking (not depth, not state content) is what makes runs
/// deterministic and reproducible across processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenKey {
    /// Raw heuristic estimate (the unreachable sentinel sorts last).
    pub estimate: u64,
    /// Monotonic insertion counter.
    pub insertion: u64,
}

impl PartialOrd for OpenKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.estimate
            .cmp(&other.estimate)
            .then(self.insertion.cmp(&other.insertion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_estimate_sorts_first() {
        let a = OpenKey {
            estimate: 1,
            insertion: 99,
        };
        let b = OpenKey {
            estimate: 2,
            insertion: 0,
        };
        assert!(a < b, "estimate dominates insertion order");
    }

    #[test]
    fn ties_break_by_insertion_fifo() {
        let first = OpenKey {
            estimate: 3,
            insertion: 10,
        };
        let second = OpenKey {
            estimate: 3,
            insertion: 11,
        };
        assert!(first < second, "earlier insertion pops first on a tie");
    }
}
