//! Static adjacency model over the process nodes
//!
//! Nodes are indexed `0..n` internally; each carries an externally
//! visible process id. The graph is immutable once built and shared
//! read-only across process units.

use crate::observer::SimObserver;
use crate::types::ProcessId;
use std::collections::HashMap;
use thiserror::Error;

/// Errors from graph construction
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("adjacency matrix has {rows} rows for {nodes} nodes")]
    DimensionMismatch { nodes: usize, rows: usize },

    #[error("row {row} has {len} entries, expected {expected}")]
    RowLength { row: usize, len: usize, expected: usize },

    #[error("adjacency entry ({row}, {col}) is {value}, expected 0 or 1")]
    InvalidEntry { row: usize, col: usize, value: u8 },

    #[error("adjacency is not symmetric at ({row}, {col})")]
    Asymmetric { row: usize, col: usize },

    #[error("self loop at node {node}")]
    SelfLoop { node: usize },

    #[error("duplicate process id {id}")]
    DuplicateId { id: ProcessId },
}

/// Immutable undirected graph with externally visible process ids
#[derive(Debug, Clone)]
pub struct Graph {
    ids: Vec<ProcessId>,
    index: HashMap<ProcessId, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Build a graph from process ids and a 0/1 adjacency matrix.
    ///
    /// The matrix must be square, symmetric, and zero on the diagonal.
    pub fn from_adjacency_matrix(
        ids: Vec<ProcessId>,
        matrix: &[Vec<u8>],
    ) -> Result<Self, GraphError> {
        let n = ids.len();
        if matrix.len() != n {
            return Err(GraphError::DimensionMismatch {
                nodes: n,
                rows: matrix.len(),
            });
        }
        for (row, entries) in matrix.iter().enumerate() {
            if entries.len() != n {
                return Err(GraphError::RowLength {
                    row,
                    len: entries.len(),
                    expected: n,
                });
            }
            for (col, &value) in entries.iter().enumerate() {
                if value > 1 {
                    return Err(GraphError::InvalidEntry { row, col, value });
                }
                if value == 1 && row == col {
                    return Err(GraphError::SelfLoop { node: row });
                }
                if value != matrix[col][row] {
                    return Err(GraphError::Asymmetric { row, col });
                }
            }
        }

        let mut index = HashMap::with_capacity(n);
        for (i, &id) in ids.iter().enumerate() {
            if index.insert(id, i).is_some() {
                return Err(GraphError::DuplicateId { id });
            }
        }

        // Rows are scanned in ascending column order, so every
        // neighbor list comes out sorted; the sort order fixes the
        // iteration order everywhere downstream.
        let mut adjacency = vec![Vec::new(); n];
        for (i, entries) in matrix.iter().enumerate() {
            for (j, &value) in entries.iter().enumerate() {
                if value == 1 {
                    adjacency[i].push(j);
                }
            }
        }

        Ok(Self {
            ids,
            index,
            adjacency,
        })
    }

    /// Number of nodes
    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// External process id of an internal node index
    pub fn process_id(&self, node: usize) -> ProcessId {
        self.ids[node]
    }

    /// All process ids in node-index order
    pub fn ids(&self) -> &[ProcessId] {
        &self.ids
    }

    /// Internal node index of an external process id
    pub fn index_of(&self, id: ProcessId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Neighbor indices of a node, sorted ascending
    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    /// Number of neighbors of a node
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Undirected edges as index pairs with `i < j`
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(i, nbrs)| {
            nbrs.iter()
                .filter(move |&&j| i < j)
                .map(move |&j| (i, j))
        })
    }

    /// Replay node and edge creation events to an observer so a
    /// renderer can build its scene before the simulation starts.
    pub fn announce(&self, observer: &dyn SimObserver) {
        for &id in &self.ids {
            observer.node_added(id);
        }
        for (i, j) in self.edges() {
            observer.edge_added(self.ids[i], self.ids[j]);
        }
    }
}
