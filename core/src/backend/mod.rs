//! Adjacency representations.
//!
//! Both backends store an undirected graph over the dense vertex range
//! `0..vertex_count` and expose it through [`Adjacency`]. The algorithms
//! themselves live in [`crate::traversal`] and only ever touch a backend
//! through `neighbors`, so any cost difference between the two comes
//! from how each one enumerates a row.

mod list;
mod matrix;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub(crate) use list::ListBackend;
pub(crate) use matrix::MatrixBackend;

use crate::edge::VertexId;
use crate::error::GraphError;
use crate::traversal::{self, ShortestPaths, TraversalResult};

/// Which representation a [`crate::Graph`] is built on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Matrix,
    List,
}

impl BackendKind {
    pub const ALL: [BackendKind; 2] = [BackendKind::Matrix, BackendKind::List];

    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Matrix => "matrix",
            BackendKind::List => "list",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = GraphError;

    /// Accepts `matrix`/`list` plus the Portuguese `matriz`/`lista` used by
    /// older edge-list tooling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "matrix" | "matriz" => Ok(BackendKind::Matrix),
            "list" | "lista" => Ok(BackendKind::List),
            _ => Err(GraphError::Config(s.to_string())),
        }
    }
}

/// Shared capability interface of the matrix and list representations.
///
/// Implementors provide storage primitives; the traversal operations are
/// provided methods over `neighbors`. Vertex arguments are assumed to be
/// in range: bounds checking is done once by [`crate::Graph`].
pub(crate) trait Adjacency {
    type Neighbors<'a>: Iterator<Item = (VertexId, f64)>
    where
        Self: 'a;

    fn vertex_count(&self) -> usize;

    /// Number of distinct unordered vertex pairs with an edge.
    fn edge_count(&self) -> usize;

    /// Store the undirected edge `{src, dest}`, overwriting any previous weight.
    ///
    /// Both endpoints must be below `vertex_count()`.
    fn insert(&mut self, src: VertexId, dest: VertexId, weight: f64);

    /// Every `(neighbor, weight)` pair adjacent to `v`.
    fn neighbors(&self, v: VertexId) -> Self::Neighbors<'_>;

    fn degree(&self, v: VertexId) -> usize;

    /// Weight of the edge `{a, b}`, if present.
    fn weight(&self, a: VertexId, b: VertexId) -> Option<f64>;

    /// Smallest stored weight, `None` when there are no edges.
    fn min_weight(&self) -> Option<f64>;

    /// Approximate heap footprint in bytes.
    fn memory_usage(&self) -> usize;

    fn degree_table(&self) -> Vec<usize> {
        (0..self.vertex_count())
            .map(|i| self.degree(VertexId::new(i)))
            .collect()
    }

    fn breadth_first_search(&self, origin: VertexId) -> TraversalResult {
        traversal::breadth_first_search(self, origin)
    }

    fn depth_first_search(&self, origin: VertexId) -> TraversalResult {
        traversal::depth_first_search(self, origin)
    }

    fn dijkstra(&self, origin: VertexId) -> ShortestPaths {
        traversal::dijkstra(self, origin)
    }

    fn connected_components(&self) -> Vec<BTreeSet<VertexId>> {
        traversal::connected_components(self)
    }
}
