//! MIS Core Library
//!
//! Simulates a synchronous distributed system of shared-memory process
//! nodes that elect a Maximal Independent Set by randomized rounds,
//! then dispatches one robot per elected node and drives the robots to
//! their targets under per-node mutual exclusion.

pub mod assign;
pub mod engine;
pub mod gate;
pub mod graph;
pub mod movement;
pub mod observer;
pub mod path;
pub mod state;
pub mod types;
pub mod unit;
pub mod verify;

pub use assign::{assign_robots, random_starts, AssignError, Robot};
pub use engine::{EngineError, IdFactory, MisEngine};
pub use gate::RoundGate;
pub use graph::{Graph, GraphError};
pub use movement::{MovementError, MovementReport, MovementSim};
pub use observer::{NullObserver, SimObserver};
pub use path::{distances_from, shortest_path};
pub use state::ElectionStore;
pub use types::{MisOutcome, NodeState, ProcessId};
pub use unit::{IdDraw, ProcessUnit, ScriptedDraw, UniformDraw};
pub use verify::verify_mis;
