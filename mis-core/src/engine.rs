//! Election orchestration
//!
//! Builds one process unit per graph node, starts them together
//! through the start gate, waits for every unit to reach a terminal
//! state, and extracts the elected set and the global round count.

use crate::gate::RoundGate;
use crate::graph::Graph;
use crate::observer::{NullObserver, SimObserver};
use crate::state::ElectionStore;
use crate::types::MisOutcome;
use crate::unit::{IdDraw, ProcessUnit, UniformDraw};
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Errors from an election run
#[derive(Error, Debug)]
pub enum EngineError {
    /// A process unit died before reaching a terminal state. The
    /// synchronous round model cannot recover from a missing
    /// rendezvous participant, so the run is aborted.
    #[error("process unit failed before termination: {0}")]
    CoordinationFailure(String),
}

/// Factory producing each unit's id source, keyed by node index
pub type IdFactory = dyn Fn(usize) -> Box<dyn IdDraw> + Send + Sync;

/// Distributed MIS election over a shared graph
pub struct MisEngine {
    graph: Arc<Graph>,
    observer: Arc<dyn SimObserver>,
    id_factory: Arc<IdFactory>,
}

impl MisEngine {
    pub fn new(graph: Arc<Graph>) -> Self {
        let nodes = graph.node_count();
        Self {
            graph,
            observer: Arc::new(NullObserver),
            id_factory: Arc::new(move |node| {
                let seed = rand::random::<u64>() ^ node as u64;
                Box::new(UniformDraw::new(nodes, seed)) as Box<dyn IdDraw>
            }),
        }
    }

    /// Attach an observer notified of node state transitions
    pub fn with_observer(mut self, observer: Arc<dyn SimObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Derive every unit's id stream from one master seed, for
    /// reproducible runs
    pub fn with_seed(mut self, seed: u64) -> Self {
        let nodes = self.graph.node_count();
        self.id_factory = Arc::new(move |node| {
            let unit_seed = seed
                .wrapping_mul(0x9e37_79b9_7f4a_7c15)
                .wrapping_add(node as u64);
            Box::new(UniformDraw::new(nodes, unit_seed)) as Box<dyn IdDraw>
        });
        self
    }

    /// Replace the id source entirely (used by tests to script draws)
    pub fn with_id_factory(mut self, factory: Arc<IdFactory>) -> Self {
        self.id_factory = factory;
        self
    }

    /// Run the election to completion
    pub async fn compute(&self) -> Result<MisOutcome, EngineError> {
        let n = self.graph.node_count();
        if n == 0 {
            return Ok(MisOutcome {
                members: BTreeSet::new(),
                rounds: 0,
            });
        }

        let store = Arc::new(ElectionStore::new(n));
        let start_gate = Arc::new(RoundGate::new(n + 1));
        let round_gate = Arc::new(RoundGate::new(n));

        let mut units = JoinSet::new();
        for node in 0..n {
            let unit = ProcessUnit::new(
                node,
                &self.graph,
                (self.id_factory)(node),
                store.clone(),
                start_gate.clone(),
                round_gate.clone(),
                self.observer.clone(),
            );
            units.spawn(unit.run());
        }

        info!(nodes = n, "election started");
        start_gate.arrive_and_wait().await;

        let mut rounds = 0u32;
        while let Some(joined) = units.join_next().await {
            match joined {
                Ok(unit_rounds) => rounds = rounds.max(unit_rounds),
                Err(err) => {
                    warn!(error = %err, "process unit lost, aborting election");
                    units.abort_all();
                    return Err(EngineError::CoordinationFailure(err.to_string()));
                }
            }
        }

        let members = store.independent_set(&self.graph);
        info!(members = members.len(), rounds, "election finished");
        Ok(MisOutcome { members, rounds })
    }
}
