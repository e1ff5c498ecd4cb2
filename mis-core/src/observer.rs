//! Observation hooks for renderers and tests
//!
//! The core surfaces state transitions as callbacks so a
//! visualization layer can mirror the simulation without the core
//! depending on any rendering technology.

use crate::types::{NodeState, ProcessId};

/// Receiver for simulation state transitions.
///
/// All methods have no-op defaults; implementors override what they
/// need. Election-phase callbacks arrive from concurrently running
/// process units, movement-phase callbacks from the single-threaded
/// tick loop.
pub trait SimObserver: Send + Sync {
    /// A graph node was registered
    fn node_added(&self, _node: ProcessId) {}

    /// An undirected edge was registered
    fn edge_added(&self, _a: ProcessId, _b: ProcessId) {}

    /// A node changed election state
    fn node_state_changed(&self, _node: ProcessId, _state: NodeState) {}

    /// A robot advanced one hop
    fn robot_moved(&self, _robot: usize, _from: ProcessId, _to: ProcessId) {}

    /// A robot reached its target; the node is permanently occupied
    fn node_filled(&self, _node: ProcessId) {}

    /// One movement tick finished; all robots have been evaluated once
    fn tick_completed(&self, _tick: u32) {}
}

/// Observer that ignores every event
pub struct NullObserver;

impl SimObserver for NullObserver {}
