//! Robot-to-target assignment
//!
//! One robot is dispatched per elected node. Assignment is greedy in
//! robot order: each robot claims the nearest unclaimed target before
//! the next robot is considered, so the result depends on robot order
//! and is not a globally optimal matching. Equal distances resolve to
//! the lowest node index.

use crate::graph::Graph;
use crate::path::{distances_from, shortest_path};
use crate::types::ProcessId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

/// Errors from robot assignment
#[derive(Error, Debug)]
pub enum AssignError {
    #[error("{robots} robots for {targets} elected nodes, nothing left to claim")]
    TooManyRobots { robots: usize, targets: usize },

    #[error("robot {robot} cannot reach any unclaimed elected node")]
    NoReachableTarget { robot: usize },
}

/// A mobile agent routed onto one elected node
#[derive(Debug, Clone)]
pub struct Robot {
    pub id: usize,
    pub start: usize,
    pub target: usize,
    pub current: usize,
    /// Node sequence from start to target, inclusive of both
    pub path: Vec<usize>,
}

/// Robot start nodes: a prefix of a random permutation of all graph
/// nodes, so no two robots share a start.
pub fn random_starts(node_count: usize, robots: usize, rng: &mut StdRng) -> Vec<usize> {
    let mut nodes: Vec<usize> = (0..node_count).collect();
    nodes.shuffle(rng);
    nodes.truncate(robots);
    nodes
}

/// Assign each start node the nearest unclaimed member of `mis` and
/// plan its path.
pub fn assign_robots(
    graph: &Graph,
    mis: &BTreeSet<ProcessId>,
    starts: &[usize],
) -> Result<Vec<Robot>, AssignError> {
    let mut targets: Vec<usize> = mis
        .iter()
        .filter_map(|&id| graph.index_of(id))
        .collect();
    targets.sort_unstable();

    if starts.len() > targets.len() {
        return Err(AssignError::TooManyRobots {
            robots: starts.len(),
            targets: targets.len(),
        });
    }

    let mut claimed = vec![false; targets.len()];
    let mut robots = Vec::with_capacity(starts.len());

    for (id, &start) in starts.iter().enumerate() {
        let dist = distances_from(graph, start);

        // Scan targets in ascending node order with a strict-less
        // comparison: equal distances keep the lowest index.
        let mut best: Option<(u32, usize)> = None;
        for (slot, &target) in targets.iter().enumerate() {
            if claimed[slot] {
                continue;
            }
            if let Some(d) = dist[target] {
                if best.map_or(true, |(best_d, _)| d < best_d) {
                    best = Some((d, slot));
                }
            }
        }

        let (distance, slot) = best.ok_or(AssignError::NoReachableTarget { robot: id })?;
        claimed[slot] = true;
        let target = targets[slot];

        let path = shortest_path(graph, start, target)
            .ok_or(AssignError::NoReachableTarget { robot: id })?;
        debug!(robot = id, start, target, distance, "target claimed");

        robots.push(Robot {
            id,
            start,
            target,
            current: start,
            path,
        });
    }

    Ok(robots)
}
