//! Random connected test-graph generation
//!
//! Builds a chain over a shuffled permutation of the nodes, which is
//! connected by construction, and writes it in the input format the
//! loader consumes.

use mis_core::ProcessId;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Generation parameters
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Exact node count; drawn from `1..=max_nodes` when absent
    pub nodes: Option<usize>,
    /// Upper bound for the random node count
    pub max_nodes: usize,
    /// Seed for reproducible generation
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            nodes: None,
            max_nodes: 100,
            seed: None,
        }
    }
}

/// Generate process ids and a connected adjacency matrix
pub fn generate(config: &GeneratorConfig) -> (Vec<ProcessId>, Vec<Vec<u8>>) {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let n = config
        .nodes
        .unwrap_or_else(|| rng.gen_range(1..=config.max_nodes.max(1)));

    let ids: Vec<ProcessId> = (0..n as u32).collect();

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(&mut rng);

    let mut matrix = vec![vec![0u8; n]; n];
    for pair in order.windows(2) {
        matrix[pair[0]][pair[1]] = 1;
        matrix[pair[1]][pair[0]] = 1;
    }

    (ids, matrix)
}

/// Write a generated graph in the input format
pub fn write_input(path: &Path, ids: &[ProcessId], matrix: &[Vec<u8>]) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    writeln!(out, "{}", ids.len())?;
    let id_line = ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "{}", id_line)?;

    for row in matrix {
        let row_line = row
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(out, "{}", row_line)?;
    }

    out.flush()
}
