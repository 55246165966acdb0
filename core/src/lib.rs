//! graph-repr-core: undirected graph engine with two interchangeable
//! representations.
//!
//! A [`Graph`] is bound at construction to either an adjacency matrix
//! ([`BackendKind::Matrix`], sparse dictionary-of-keys storage, O(V) row
//! scans) or an adjacency list ([`BackendKind::List`], O(deg) neighbor
//! scans) and runs
//! BFS, stack-based DFS, Dijkstra and connected-component discovery the
//! same way over either. Both backends must agree on every result; only
//! their cost differs. The backends themselves are crate-private: every
//! call goes through `Graph`, which validates vertices first.
//!
//! Vertices are dense 0-based [`VertexId`]s internally and 1-based labels
//! at the I/O boundary. File parsing, timing and report writing live in the
//! `graph-repr-bench` driver.

mod backend;
mod edge;
mod error;
mod graph;
mod traversal;

pub use backend::BackendKind;
pub use edge::{Edge, VertexId};
pub use error::{GraphError, Result};
pub use graph::Graph;
pub use traversal::{Path, PathStep, Settled, ShortestPaths, TraversalResult, Visit};
