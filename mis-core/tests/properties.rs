//! Property tests for the election and dispatch pipeline
//!
//! Core invariants:
//! - Independence: no two elected nodes are adjacent
//! - Maximality: every node is covered by the elected set
//! - Termination: every unit reaches a terminal state in bounded rounds
//! - Assignment: robots always claim distinct, reachable targets
//! - Transit: a lone robot needs exactly path-length ticks

use mis_core::{
    assign_robots, random_starts, shortest_path, verify_mis, Graph, MisEngine, MisOutcome,
    MovementSim, Robot,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use std::sync::Arc;

// ============================================================================
// Strategies
// ============================================================================

/// Connected graph: a chain over a shuffled node order plus a few
/// extra random edges.
fn connected_graph(n: usize, seed: u64, extra_edges: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);

    let mut matrix = vec![vec![0u8; n]; n];
    for pair in order.windows(2) {
        matrix[pair[0]][pair[1]] = 1;
        matrix[pair[1]][pair[0]] = 1;
    }
    for _ in 0..extra_edges {
        let a = rng.gen_range(0..n);
        let b = rng.gen_range(0..n);
        if a != b {
            matrix[a][b] = 1;
            matrix[b][a] = 1;
        }
    }

    Graph::from_adjacency_matrix((0..n as u32).collect(), &matrix).unwrap()
}

fn run_election(graph: Arc<Graph>, seed: u64) -> MisOutcome {
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async {
        MisEngine::new(graph)
            .with_seed(seed)
            .compute()
            .await
            .unwrap()
    })
}

// ============================================================================
// Election properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// CORE INVARIANT: the elected set is independent and maximal.
    #[test]
    fn elected_set_is_independent_and_maximal(
        n in 1usize..10,
        seed in any::<u64>(),
        extra in 0u64..8,
    ) {
        let graph = Arc::new(connected_graph(n, seed, extra));
        let outcome = run_election(graph.clone(), seed);

        prop_assert!(!outcome.members.is_empty());
        prop_assert!(verify_mis(&graph, &outcome.members));

        // Independence, spelled out against the adjacency directly.
        for (i, j) in graph.edges() {
            let a = graph.process_id(i);
            let b = graph.process_id(j);
            prop_assert!(
                !(outcome.members.contains(&a) && outcome.members.contains(&b)),
                "adjacent members {} and {}", a, b
            );
        }

        // Maximality: every non-member has a member neighbor.
        for node in 0..graph.node_count() {
            if !outcome.members.contains(&graph.process_id(node)) {
                let covered = graph
                    .neighbors(node)
                    .iter()
                    .any(|&nb| outcome.members.contains(&graph.process_id(nb)));
                prop_assert!(covered, "node {} is uncovered", node);
            }
        }
    }

    /// Every unit terminates; with fresh draws each round, ties are
    /// rare enough that the round count stays near the node count.
    #[test]
    fn election_terminates_in_bounded_rounds(
        n in 1usize..10,
        seed in any::<u64>(),
    ) {
        let graph = Arc::new(connected_graph(n, seed, 2));
        let outcome = run_election(graph, seed);

        prop_assert!(outcome.rounds >= 1);
        prop_assert!(
            outcome.rounds <= n as u32 + 8,
            "{} rounds for {} nodes", outcome.rounds, n
        );
    }
}

// ============================================================================
// Assignment properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Robots always receive distinct targets and complete paths.
    #[test]
    fn assignment_claims_distinct_targets(
        n in 2usize..10,
        seed in any::<u64>(),
    ) {
        let graph = Arc::new(connected_graph(n, seed, 3));
        let outcome = run_election(graph.clone(), seed);

        let mut rng = StdRng::seed_from_u64(seed);
        let starts = random_starts(n, outcome.members.len(), &mut rng);
        let robots = assign_robots(&graph, &outcome.members, &starts).unwrap();

        let targets: BTreeSet<usize> = robots.iter().map(|r| r.target).collect();
        prop_assert_eq!(targets.len(), robots.len());

        for robot in &robots {
            prop_assert_eq!(robot.path.first(), Some(&robot.start));
            prop_assert_eq!(robot.path.last(), Some(&robot.target));
            prop_assert!(outcome.members.contains(&graph.process_id(robot.target)));
        }
    }
}

// ============================================================================
// Movement properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// A lone robot crosses its path unobstructed: one hop per tick
    /// plus the fill tick.
    #[test]
    fn single_robot_transit_takes_path_length_ticks(
        n in 2usize..12,
        seed in any::<u64>(),
    ) {
        let graph = connected_graph(n, seed, 2);
        let mut rng = StdRng::seed_from_u64(seed ^ 0xda7a);
        let start = rng.gen_range(0..n);
        let target = rng.gen_range(0..n);

        let path = shortest_path(&graph, start, target).unwrap();
        let robot = Robot {
            id: 0,
            start,
            target,
            current: start,
            path: path.clone(),
        };
        let members: BTreeSet<_> = [graph.process_id(target)].into_iter().collect();

        let report = MovementSim::new(&graph, vec![robot], &members)
            .run()
            .unwrap();

        prop_assert_eq!(report.ticks as usize, path.len());
        prop_assert_eq!(report.robots[0].current, target);
    }
}
