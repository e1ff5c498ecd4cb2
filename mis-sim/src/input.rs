//! Loader for the graph-description input format
//!
//! Whitespace-separated values: the node count, then the process ids,
//! then the n x n 0/1 adjacency matrix in row order.

use mis_core::{Graph, GraphError, ProcessId};
use std::fs;
use std::path::Path;
use std::str::{FromStr, SplitWhitespace};
use thiserror::Error;

/// Nodes beyond this spawn more units than the simulation is meant
/// to coordinate; reject the input instead of thrashing.
pub const MAX_NODES: usize = 4096;

/// Errors from loading a graph description
#[derive(Error, Debug)]
pub enum InputError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input ended after {consumed} values")]
    UnexpectedEof { consumed: usize },

    #[error("invalid value {token:?}: {reason}")]
    InvalidToken { token: String, reason: String },

    #[error("node count {nodes} exceeds the supported maximum of 4096")]
    TooManyNodes { nodes: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
    consumed: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            iter: text.split_whitespace(),
            consumed: 0,
        }
    }

    fn take<T: FromStr>(&mut self) -> Result<T, InputError>
    where
        T::Err: std::fmt::Display,
    {
        let token = self.iter.next().ok_or(InputError::UnexpectedEof {
            consumed: self.consumed,
        })?;
        self.consumed += 1;
        token.parse().map_err(|err: T::Err| InputError::InvalidToken {
            token: token.to_string(),
            reason: err.to_string(),
        })
    }
}

/// Parse a graph description from text
pub fn parse_graph(text: &str) -> Result<Graph, InputError> {
    let mut tokens = Tokens::new(text);

    let nodes: usize = tokens.take()?;
    if nodes > MAX_NODES {
        return Err(InputError::TooManyNodes { nodes });
    }

    let mut ids = Vec::with_capacity(nodes);
    for _ in 0..nodes {
        ids.push(tokens.take::<ProcessId>()?);
    }

    let mut matrix = Vec::with_capacity(nodes);
    for _ in 0..nodes {
        let mut row = Vec::with_capacity(nodes);
        for _ in 0..nodes {
            row.push(tokens.take::<u8>()?);
        }
        matrix.push(row);
    }

    Ok(Graph::from_adjacency_matrix(ids, &matrix)?)
}

/// Load a graph description from a file
pub fn load_graph(path: &Path) -> Result<Graph, InputError> {
    let text = fs::read_to_string(path)?;
    parse_graph(&text)
}
