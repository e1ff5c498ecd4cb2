//! Per-node process unit executing the randomized election
//!
//! State machine per unit:
//! - Candidate → Candidate (lost or wasted round)
//! - Candidate → Independent (terminal, locally maximal id)
//! - Candidate → Excluded (terminal, a neighbor was elected)
//!
//! Each round runs between three rendezvous points: publish the round
//! id, decide local maximality, commit membership mutations. A unit
//! whose round is wasted by an id tie still arrives at every
//! rendezvous; only the membership action is skipped. Skipping the
//! rendezvous itself would leave the other units waiting.

use crate::gate::RoundGate;
use crate::observer::SimObserver;
use crate::state::ElectionStore;
use crate::types::{NodeState, ProcessId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, trace};

/// Source of per-round random ids
pub trait IdDraw: Send {
    fn draw(&mut self) -> u64;
}

/// Uniform draw in `[1, n^4]`, the id range of the election
pub struct UniformDraw {
    rng: StdRng,
    max: u64,
}

impl UniformDraw {
    pub fn new(nodes: usize, seed: u64) -> Self {
        let n = nodes.max(1) as u64;
        Self {
            rng: StdRng::seed_from_u64(seed),
            max: n.pow(4),
        }
    }
}

impl IdDraw for UniformDraw {
    fn draw(&mut self) -> u64 {
        self.rng.gen_range(1..=self.max)
    }
}

/// Scripted ids for the first rounds, uniform fallback afterwards.
/// Lets tests force ties and fixed comparisons.
pub struct ScriptedDraw {
    script: VecDeque<u64>,
    fallback: UniformDraw,
}

impl ScriptedDraw {
    pub fn new(script: Vec<u64>, fallback: UniformDraw) -> Self {
        Self {
            script: script.into(),
            fallback,
        }
    }
}

impl IdDraw for ScriptedDraw {
    fn draw(&mut self) -> u64 {
        self.script
            .pop_front()
            .unwrap_or_else(|| self.fallback.draw())
    }
}

/// One logical process node of the synchronous system
pub struct ProcessUnit {
    node: usize,
    pid: ProcessId,
    neighbors: Vec<usize>,
    neighbor_pids: Vec<ProcessId>,
    ids: Box<dyn IdDraw>,
    store: Arc<ElectionStore>,
    start_gate: Arc<RoundGate>,
    round_gate: Arc<RoundGate>,
    observer: Arc<dyn SimObserver>,
}

impl ProcessUnit {
    pub fn new(
        node: usize,
        graph: &crate::graph::Graph,
        ids: Box<dyn IdDraw>,
        store: Arc<ElectionStore>,
        start_gate: Arc<RoundGate>,
        round_gate: Arc<RoundGate>,
        observer: Arc<dyn SimObserver>,
    ) -> Self {
        let neighbors = graph.neighbors(node).to_vec();
        let neighbor_pids = neighbors.iter().map(|&nb| graph.process_id(nb)).collect();
        Self {
            node,
            pid: graph.process_id(node),
            neighbors,
            neighbor_pids,
            ids,
            store,
            start_gate,
            round_gate,
            observer,
        }
    }

    /// Run the election to a terminal state; returns rounds executed
    pub async fn run(mut self) -> u32 {
        self.start_gate.arrive_and_wait().await;

        let mut rounds = 0u32;
        while self.store.is_candidate(self.node) {
            let id = self.ids.draw();
            self.store.publish_id(self.node, id);
            debug!(node = self.pid, round = rounds + 1, id, "published round id");

            // Publish rendezvous: every candidate's id for this round
            // is visible before anyone compares.
            self.round_gate.arrive_and_wait().await;

            let mut is_max = true;
            let mut wasted = false;
            for &nb in &self.neighbors {
                if !self.store.is_candidate(nb) {
                    continue;
                }
                let neighbor_id = self.store.round_id(nb);
                if neighbor_id > id {
                    is_max = false;
                    break;
                }
                if neighbor_id == id {
                    wasted = true;
                    break;
                }
            }

            // Decide rendezvous: all comparisons are done before any
            // unit mutates candidacy.
            self.round_gate.arrive_and_wait().await;

            if wasted {
                trace!(node = self.pid, round = rounds + 1, "round wasted on id tie");
            } else if is_max {
                self.store.mark_independent(self.node);
                self.observer
                    .node_state_changed(self.pid, NodeState::Independent);
                debug!(node = self.pid, round = rounds + 1, "joined the independent set");
                for (&nb, &nb_pid) in self.neighbors.iter().zip(&self.neighbor_pids) {
                    if self.store.clear_candidate(nb) {
                        self.observer.node_state_changed(nb_pid, NodeState::Excluded);
                    }
                }
            }

            rounds += 1;

            // Commit rendezvous: candidacy mutations are visible
            // before the next round draws.
            self.round_gate.arrive_and_wait().await;
        }

        self.round_gate.leave();
        rounds
    }
}
