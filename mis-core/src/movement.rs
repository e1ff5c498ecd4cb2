//! Discrete-time robot movement with per-node mutual exclusion
//!
//! One tick evaluates every robot once, in robot order. A robot
//! stalls when its next node is occupied, unless the next node is an
//! elected node (the blocking rule exempts them). A robot standing on
//! its target fills it: the node stays occupied forever and the robot
//! is done. The simulation ends when every robot has filled its
//! target; the tick count is the reported maximum hop count.

use crate::assign::Robot;
use crate::graph::Graph;
use crate::observer::{NullObserver, SimObserver};
use crate::types::ProcessId;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors from the movement simulation
#[derive(Error, Debug)]
pub enum MovementError {
    #[error("robot {robot} is off its planned path at node {node}")]
    OffPath { robot: usize, node: usize },

    /// Robots blocked each other with no progress possible. The tick
    /// limit turns a mutual stall into a diagnosable failure instead
    /// of a hang.
    #[error("targets still unfilled after {ticks} ticks, robots are mutually blocked")]
    TickLimitExceeded { ticks: u32 },
}

/// Outcome of a completed movement simulation
#[derive(Debug)]
pub struct MovementReport {
    /// Ticks until every target was filled (the maximum hop count)
    pub ticks: u32,
    /// Robots in their final positions
    pub robots: Vec<Robot>,
}

/// Tick-based movement simulation over assigned robots
pub struct MovementSim<'a> {
    graph: &'a Graph,
    robots: Vec<Robot>,
    elected: Vec<bool>,
    blocked: Vec<bool>,
    filled: Vec<bool>,
    reached: Vec<bool>,
    tick_limit: u32,
    observer: Arc<dyn SimObserver>,
}

impl<'a> MovementSim<'a> {
    pub fn new(graph: &'a Graph, robots: Vec<Robot>, mis: &BTreeSet<ProcessId>) -> Self {
        let n = graph.node_count();

        let mut elected = vec![false; n];
        for &id in mis {
            if let Some(node) = graph.index_of(id) {
                elected[node] = true;
            }
        }

        // Start positions count as occupied from the first tick, so a
        // robot cannot move onto another robot that has not left yet.
        let mut blocked = vec![false; n];
        for robot in &robots {
            blocked[robot.current] = true;
        }

        let tick_limit = (4 * n as u64 * robots.len().max(1) as u64 + 64)
            .min(u32::MAX as u64) as u32;
        let reached = vec![false; robots.len()];

        Self {
            graph,
            robots,
            elected,
            blocked,
            filled: vec![false; n],
            reached,
            tick_limit,
            observer: Arc::new(NullObserver),
        }
    }

    /// Attach an observer notified of moves and filled targets
    pub fn with_observer(mut self, observer: Arc<dyn SimObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Override the mutual-stall safety limit
    pub fn with_tick_limit(mut self, limit: u32) -> Self {
        self.tick_limit = limit;
        self
    }

    fn all_reached(&self) -> bool {
        self.reached.iter().all(|&done| done)
    }

    /// Evaluate every robot once
    fn step(&mut self) -> Result<(), MovementError> {
        for i in 0..self.robots.len() {
            if self.reached[i] {
                continue;
            }

            let current = self.robots[i].current;
            let target = self.robots[i].target;

            if current == target {
                self.filled[target] = true;
                self.blocked[target] = true;
                self.reached[i] = true;
                self.observer.node_filled(self.graph.process_id(target));
                debug!(robot = i, node = target, "target filled");
                continue;
            }

            let pos = self.robots[i]
                .path
                .iter()
                .position(|&p| p == current)
                .ok_or(MovementError::OffPath { robot: i, node: current })?;
            let next = *self.robots[i]
                .path
                .get(pos + 1)
                .ok_or(MovementError::OffPath { robot: i, node: current })?;

            if self.blocked[next] && !self.elected[next] {
                trace!(robot = i, node = next, "stalled on occupied node");
                continue;
            }

            if !self.filled[current] {
                self.blocked[current] = false;
            }
            self.blocked[next] = true;
            self.robots[i].current = next;
            self.observer
                .robot_moved(i, self.graph.process_id(current), self.graph.process_id(next));
        }
        Ok(())
    }

    /// Run ticks until every robot has filled its target
    pub fn run(mut self) -> Result<MovementReport, MovementError> {
        let mut ticks = 0u32;
        while !self.all_reached() {
            if ticks >= self.tick_limit {
                return Err(MovementError::TickLimitExceeded { ticks });
            }
            ticks += 1;
            self.step()?;
            self.observer.tick_completed(ticks);
        }
        debug!(ticks, "all targets filled");
        Ok(MovementReport {
            ticks,
            robots: self.robots,
        })
    }
}
