//! Post-hoc verification of a computed independent set
//!
//! A failed check is a reported result, not an error: it signals an
//! implementation defect to the operator and never aborts the run.

use crate::graph::Graph;
use crate::types::ProcessId;
use std::collections::BTreeSet;

/// Check that `members` is a maximal independent set of `graph`:
/// no two members are adjacent, and every node is either a member or
/// adjacent to one.
pub fn verify_mis(graph: &Graph, members: &BTreeSet<ProcessId>) -> bool {
    let n = graph.node_count();

    let mut selected = vec![false; n];
    for &id in members {
        match graph.index_of(id) {
            Some(node) => selected[node] = true,
            None => return false,
        }
    }

    for node in 0..n {
        let neighbor_selected = graph.neighbors(node).iter().any(|&nb| selected[nb]);
        if selected[node] && neighbor_selected {
            return false;
        }
        if !selected[node] && !neighbor_selected {
            return false;
        }
    }

    true
}
