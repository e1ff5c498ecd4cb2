//! Operator-facing result report
//!
//! A failed verification verdict is part of the report, never an
//! abort: the run still finishes and the defect is surfaced to the
//! operator.

use mis_core::ProcessId;
use serde::Serialize;
use std::io::{self, Write};

/// Final results of a simulation run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Maximum round count over all process units
    pub rounds: u32,
    /// Elected process ids, ascending
    pub mis: Vec<ProcessId>,
    /// Verifier verdict over the elected set
    pub verified: bool,
    /// Ticks until every robot filled its target
    pub max_hops: u32,
}

impl RunReport {
    /// Write the plain-text report
    pub fn write_text<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "Number of rounds (phases): {}", self.rounds)?;

        let ids = self
            .mis
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "MIS has the processes with IDs: {}", ids)?;

        writeln!(out, "Checking if the MIS constructed is correct...")?;
        if self.verified {
            writeln!(out, "The MIS constructed is correct!")?;
        } else {
            writeln!(out, "The MIS constructed is not correct!")?;
        }

        writeln!(out, "The maximum no of hops is: {}", self.max_hops)
    }

    /// Pretty JSON summary of the same results
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> RunReport {
        RunReport {
            rounds: 3,
            mis: vec![0, 2, 5],
            verified: true,
            max_hops: 7,
        }
    }

    #[test]
    fn test_text_report_layout() {
        let mut out = Vec::new();
        report().write_text(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "Number of rounds (phases): 3\n\
             MIS has the processes with IDs: 0 2 5\n\
             Checking if the MIS constructed is correct...\n\
             The MIS constructed is correct!\n\
             The maximum no of hops is: 7\n"
        );
    }

    #[test]
    fn test_failed_verdict_is_reported_not_hidden() {
        let mut failed = report();
        failed.verified = false;

        let mut out = Vec::new();
        failed.write_text(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("The MIS constructed is not correct!"));
    }

    #[test]
    fn test_json_summary_fields() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["rounds"], 3);
        assert_eq!(value["verified"], true);
        assert_eq!(value["max_hops"], 7);
        assert_eq!(value["mis"].as_array().unwrap().len(), 3);
    }
}
