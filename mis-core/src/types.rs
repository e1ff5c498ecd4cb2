//! Core types for the MIS simulation

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Externally visible identifier of a process node
pub type ProcessId = u32;

/// Election-phase state of a node, as surfaced to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeState {
    /// Still eligible to join the independent set
    Candidate,
    /// A neighbor was elected; permanently out of the set
    Excluded,
    /// Elected into the independent set (terminal)
    Independent,
}

/// Result of a completed election
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MisOutcome {
    /// Process ids elected into the maximal independent set
    pub members: BTreeSet<ProcessId>,
    /// Maximum round count over all process units
    pub rounds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_serialization() {
        let outcome = MisOutcome {
            members: [3, 1].into_iter().collect(),
            rounds: 2,
        };

        let json = serde_json::to_string(&outcome).unwrap();
        let parsed: MisOutcome = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.rounds, 2);
        assert_eq!(parsed.members.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    }
}
