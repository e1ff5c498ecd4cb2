//! Shared election state store
//!
//! One slot per node: the current round id plus the candidacy and
//! independence flags. Each unit publishes its own id and reads its
//! neighbors' slots; candidacy is additionally cleared by a winning
//! neighbor. The round gates order cross-unit visibility, so the
//! store itself stays lock-free; clearing uses `swap` so exactly one
//! writer observes each terminal transition.

use crate::graph::Graph;
use crate::types::ProcessId;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Per-node election state shared by all process units
#[derive(Debug)]
pub struct ElectionStore {
    round_ids: Vec<AtomicU64>,
    candidate: Vec<AtomicBool>,
    independent: Vec<AtomicBool>,
}

impl ElectionStore {
    /// Create the store with every node a candidate
    pub fn new(nodes: usize) -> Self {
        Self {
            round_ids: (0..nodes).map(|_| AtomicU64::new(0)).collect(),
            candidate: (0..nodes).map(|_| AtomicBool::new(true)).collect(),
            independent: (0..nodes).map(|_| AtomicBool::new(false)).collect(),
        }
    }

    /// Publish a node's random id for the current round
    pub fn publish_id(&self, node: usize, id: u64) {
        self.round_ids[node].store(id, Ordering::Release);
    }

    /// Read a node's published round id
    pub fn round_id(&self, node: usize) -> u64 {
        self.round_ids[node].load(Ordering::Acquire)
    }

    /// Whether a node is still eligible for the independent set
    pub fn is_candidate(&self, node: usize) -> bool {
        self.candidate[node].load(Ordering::Acquire)
    }

    /// Clear a node's candidacy; returns true if this call made the
    /// transition (false if the node was already out).
    pub fn clear_candidate(&self, node: usize) -> bool {
        self.candidate[node].swap(false, Ordering::AcqRel)
    }

    /// Move a node into the independent set (terminal)
    pub fn mark_independent(&self, node: usize) {
        self.independent[node].store(true, Ordering::Release);
        self.candidate[node].store(false, Ordering::Release);
    }

    /// Whether a node was elected
    pub fn is_independent(&self, node: usize) -> bool {
        self.independent[node].load(Ordering::Acquire)
    }

    /// Number of nodes still candidate
    pub fn candidate_count(&self) -> usize {
        self.candidate
            .iter()
            .filter(|flag| flag.load(Ordering::Acquire))
            .count()
    }

    /// Snapshot the elected set as external process ids
    pub fn independent_set(&self, graph: &Graph) -> BTreeSet<ProcessId> {
        (0..graph.node_count())
            .filter(|&node| self.is_independent(node))
            .map(|node| graph.process_id(node))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_all_candidate() {
        let store = ElectionStore::new(3);
        assert_eq!(store.candidate_count(), 3);
        assert!(store.is_candidate(0));
        assert!(!store.is_independent(0));
        assert_eq!(store.round_id(0), 0);
    }

    #[test]
    fn test_clear_candidate_reports_transition_once() {
        let store = ElectionStore::new(2);
        assert!(store.clear_candidate(1));
        assert!(!store.clear_candidate(1));
        assert_eq!(store.candidate_count(), 1);
    }

    #[test]
    fn test_mark_independent_ends_candidacy() {
        let store = ElectionStore::new(2);
        store.mark_independent(0);
        assert!(store.is_independent(0));
        assert!(!store.is_candidate(0));
        assert_eq!(store.candidate_count(), 1);
    }

    #[test]
    fn test_snapshot_maps_to_process_ids() {
        let matrix = vec![vec![0, 1], vec![1, 0]];
        let graph = Graph::from_adjacency_matrix(vec![20, 30], &matrix).unwrap();

        let store = ElectionStore::new(2);
        store.mark_independent(1);

        let members = store.independent_set(&graph);
        assert_eq!(members.into_iter().collect::<Vec<_>>(), vec![30]);
    }
}
