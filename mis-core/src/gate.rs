//! Round-boundary rendezvous for the synchronous network model
//!
//! Every process unit must finish its round-`k` work before any unit
//! starts round `k+1`. The gate is a cyclic rendezvous sized to the
//! current participant count; units deregister when they reach a
//! terminal state so later generations release with fewer parties.
//!
//! A participant that never arrives blocks the remaining participants
//! forever. That matches the all-or-nothing semantics of a synchronous
//! round: the engine converts unit failures into an aborted run
//! instead of letting the rendezvous hang.

use parking_lot::Mutex;
use tokio::sync::watch;

#[derive(Debug)]
struct GateState {
    participants: usize,
    arrived: usize,
    generation: u64,
}

/// Cyclic rendezvous with deregistration
#[derive(Debug)]
pub struct RoundGate {
    state: Mutex<GateState>,
    advanced: watch::Sender<u64>,
}

impl RoundGate {
    /// Create a gate for `participants` parties
    pub fn new(participants: usize) -> Self {
        let (advanced, _) = watch::channel(0);
        Self {
            state: Mutex::new(GateState {
                participants,
                arrived: 0,
                generation: 0,
            }),
            advanced,
        }
    }

    /// Number of currently registered participants
    pub fn participants(&self) -> usize {
        self.state.lock().participants
    }

    /// Arrive at the rendezvous and wait until every registered
    /// participant has arrived. The last arrival releases all waiters
    /// and opens the next generation.
    pub async fn arrive_and_wait(&self) {
        let (mut rx, target) = {
            let mut state = self.state.lock();
            state.arrived += 1;
            if state.arrived >= state.participants {
                state.arrived = 0;
                state.generation += 1;
                let generation = state.generation;
                drop(state);
                self.advanced.send_replace(generation);
                return;
            }
            // Subscribe while holding the lock so an advance cannot
            // slip between registration and the first wait.
            (self.advanced.subscribe(), state.generation + 1)
        };

        while *rx.borrow_and_update() < target {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }

    /// Deregister a participant that reached a terminal state. If the
    /// departing party was the last one holding up the current
    /// generation, the waiters are released.
    pub fn leave(&self) {
        let released = {
            let mut state = self.state.lock();
            state.participants = state.participants.saturating_sub(1);
            if state.participants > 0 && state.arrived >= state.participants {
                state.arrived = 0;
                state.generation += 1;
                Some(state.generation)
            } else {
                None
            }
        };
        if let Some(generation) = released {
            self.advanced.send_replace(generation);
        }
    }
}
