use std::collections::BTreeSet;

use tracing::{info, warn};

use crate::backend::{Adjacency, BackendKind, ListBackend, MatrixBackend};
use crate::edge::{Edge, VertexId};
use crate::error::{GraphError, Result};
use crate::traversal::{Path, ShortestPaths, TraversalResult};

#[derive(Debug)]
enum Backend {
    Matrix(MatrixBackend),
    List(ListBackend),
}

/// Run the same expression against whichever backend is active.
macro_rules! with_backend {
    ($self:expr, $b:ident => $e:expr) => {
        match &$self.backend {
            Backend::Matrix($b) => $e,
            Backend::List($b) => $e,
        }
    };
}

/// Undirected graph over vertices `1..=vertices_num`, bound to one backend.
///
/// The backend kind, vertex count and weighted flag are fixed at
/// construction. Every query validates its vertex arguments and then
/// delegates to the backend; no traversal state outlives a call.
#[derive(Debug)]
pub struct Graph {
    kind: BackendKind,
    vertices_num: usize,
    weighted: bool,
    backend: Backend,
}

impl Graph {
    /// Build a graph from a backend kind name (`"matrix"` or `"list"`).
    pub fn new(kind: &str, vertices_num: usize, weighted: bool) -> Result<Self> {
        Self::with_kind(kind.parse()?, vertices_num, weighted)
    }

    pub fn with_kind(kind: BackendKind, vertices_num: usize, weighted: bool) -> Result<Self> {
        let too_many = || GraphError::VertexLimit {
            requested: vertices_num,
            max: VertexId::MAX_INDEX,
        };
        if vertices_num > VertexId::MAX_INDEX {
            return Err(too_many());
        }
        let backend = match kind {
            BackendKind::Matrix => Backend::Matrix(MatrixBackend::new(vertices_num).ok_or_else(too_many)?),
            BackendKind::List => Backend::List(ListBackend::new(vertices_num)),
        };
        Ok(Self {
            kind,
            vertices_num,
            weighted,
            backend,
        })
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    pub fn vertices_num(&self) -> usize {
        self.vertices_num
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn edge_count(&self) -> usize {
        with_backend!(self, b => b.edge_count())
    }

    /// Approximate memory held by the backend, in bytes.
    pub fn memory_usage(&self) -> usize {
        with_backend!(self, b => b.memory_usage())
    }

    /// Resolve a 1-based label to a vertex of this graph.
    pub fn vertex(&self, label: usize) -> Result<VertexId> {
        VertexId::from_label(label)
            .filter(|v| v.index() < self.vertices_num)
            .ok_or(GraphError::UnknownVertex {
                label,
                vertices_num: self.vertices_num,
            })
    }

    fn check_vertex(&self, v: VertexId) -> Result<()> {
        if v.index() < self.vertices_num {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex {
                label: v.label(),
                vertices_num: self.vertices_num,
            })
        }
    }

    /// Insert an undirected edge.
    ///
    /// Weighted graphs require a finite weight on every edge; unweighted
    /// graphs reject any weight and store the edge with weight 1.
    /// Re-inserting a pair overwrites its weight.
    pub fn insert_edge(&mut self, edge: Edge) -> Result<()> {
        let (src, dest) = edge.endpoints();
        self.check_vertex(src)?;
        self.check_vertex(dest)?;

        let weight = match (self.weighted, edge.weight()) {
            (true, Some(w)) if !w.is_finite() => {
                return Err(GraphError::InvalidWeight {
                    src,
                    dest,
                    weight: w,
                })
            }
            (true, Some(w)) => w,
            (true, None) => return Err(GraphError::MissingWeight { src, dest }),
            (false, Some(w)) => {
                return Err(GraphError::UnexpectedWeight {
                    src,
                    dest,
                    weight: w,
                })
            }
            (false, None) => 1.0,
        };

        match &mut self.backend {
            Backend::Matrix(b) => b.insert(src, dest, weight),
            Backend::List(b) => b.insert(src, dest, weight),
        }
        Ok(())
    }

    /// Degree of every vertex, indexed by `VertexId::index()`.
    pub fn degree_table(&self) -> Vec<usize> {
        with_backend!(self, b => b.degree_table())
    }

    /// Stored weight of the edge `{a, b}`; `None` when there is no such edge.
    pub fn edge_weight(&self, a: VertexId, b: VertexId) -> Result<Option<f64>> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        Ok(with_backend!(self, store => store.weight(a, b)))
    }

    /// Neighbors of `v` with their edge weights.
    pub fn neighbors(&self, v: VertexId) -> Result<Vec<(VertexId, f64)>> {
        self.check_vertex(v)?;
        Ok(with_backend!(self, b => b.neighbors(v).collect()))
    }

    pub fn breadth_first_search(&self, origin: VertexId) -> Result<TraversalResult> {
        self.check_vertex(origin)?;
        Ok(with_backend!(self, b => b.breadth_first_search(origin)))
    }

    pub fn depth_first_search(&self, origin: VertexId) -> Result<TraversalResult> {
        self.check_vertex(origin)?;
        Ok(with_backend!(self, b => b.depth_first_search(origin)))
    }

    /// True if any stored edge weight is negative.
    pub fn has_negative_weights(&self) -> bool {
        let min = with_backend!(self, b => b.min_weight());
        min.is_some_and(|w| w < 0.0)
    }

    /// Single-source shortest paths from `origin`.
    ///
    /// Negative weights do not stop the run; they set
    /// [`ShortestPaths::negative_weights`] and log a warning.
    pub fn dijkstra(&self, origin: VertexId) -> Result<ShortestPaths> {
        self.check_vertex(origin)?;
        let paths = with_backend!(self, b => b.dijkstra(origin));
        if paths.negative_weights() {
            warn!(
                origin = %origin,
                "graph has negative edge weights; dijkstra distances may not be minimal"
            );
        }
        Ok(paths)
    }

    /// Minimum path from `origin` to `end`.
    ///
    /// Weighted graphs use Dijkstra and report cumulative weight per step;
    /// unweighted graphs use BFS and report hop counts. `Ok(None)` means
    /// `end` lies in a different component.
    pub fn find_minimum_path(&self, origin: VertexId, end: VertexId) -> Result<Option<Path>> {
        self.check_vertex(origin)?;
        self.check_vertex(end)?;

        let path = if self.weighted {
            let tree = self.dijkstra(origin)?;
            tree.path_to(end).map(|steps| Path {
                steps,
                negative_weights: tree.negative_weights(),
            })
        } else {
            self.breadth_first_search(origin)?
                .hop_path_to(end)
                .map(|steps| Path {
                    steps,
                    negative_weights: false,
                })
        };

        if path.is_none() {
            info!(
                origin = %origin,
                end = %end,
                "destination is not in the same component as the origin"
            );
        }
        Ok(path)
    }

    /// Partition of all vertices into components, ordered by smallest member.
    pub fn find_connected_components(&self) -> Vec<BTreeSet<VertexId>> {
        with_backend!(self, b => b.connected_components())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(label: usize) -> VertexId {
        VertexId::from_label(label).unwrap()
    }

    fn make_graph(kind: BackendKind, n: usize, weighted: bool, edges: &[(usize, usize, f64)]) -> Graph {
        let mut g = Graph::with_kind(kind, n, weighted).unwrap();
        for &(a, b, w) in edges {
            let edge = if weighted {
                Edge::weighted(v(a), v(b), w)
            } else {
                Edge::unweighted(v(a), v(b))
            };
            g.insert_edge(edge).unwrap();
        }
        g
    }

    fn two_triangles(kind: BackendKind) -> Graph {
        make_graph(
            kind,
            6,
            false,
            &[
                (1, 2, 0.0),
                (2, 3, 0.0),
                (3, 1, 0.0),
                (4, 5, 0.0),
                (5, 6, 0.0),
                (6, 4, 0.0),
            ],
        )
    }

    // --- Construction ---

    #[test]
    fn test_new_from_kind_name() {
        let g = Graph::new("list", 4, true).unwrap();
        assert_eq!(g.kind(), BackendKind::List);
        assert_eq!(g.vertices_num(), 4);
        assert!(g.is_weighted());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_new_rejects_unknown_kind() {
        match Graph::new("hypergraph", 4, false) {
            Err(GraphError::Config(name)) => assert_eq!(name, "hypergraph"),
            other => panic!("expected Config error, got {:?}", other.err()),
        }
    }

    // --- Insertion ---

    #[test]
    fn test_weighted_requires_weight() {
        let mut g = Graph::with_kind(BackendKind::Matrix, 3, true).unwrap();
        let err = g.insert_edge(Edge::unweighted(v(1), v(2))).unwrap_err();
        assert!(err.is_weight_mismatch());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_unweighted_rejects_weight() {
        let mut g = Graph::with_kind(BackendKind::List, 3, false).unwrap();
        let err = g.insert_edge(Edge::weighted(v(1), v(2), 2.0)).unwrap_err();
        assert!(err.is_weight_mismatch());
    }

    #[test]
    fn test_weighted_rejects_nan() {
        let mut g = Graph::with_kind(BackendKind::List, 3, true).unwrap();
        let err = g.insert_edge(Edge::weighted(v(1), v(2), f64::NAN)).unwrap_err();
        assert!(matches!(err, GraphError::InvalidWeight { .. }));
    }

    #[test]
    fn test_insert_unknown_endpoint() {
        let mut g = Graph::with_kind(BackendKind::Matrix, 3, false).unwrap();
        let err = g.insert_edge(Edge::unweighted(v(1), v(4))).unwrap_err();
        assert_eq!(
            err,
            GraphError::UnknownVertex {
                label: 4,
                vertices_num: 3
            }
        );
    }

    #[test]
    fn test_neighbors_symmetric_with_weight() {
        for kind in BackendKind::ALL {
            let g = make_graph(kind, 3, true, &[(1, 3, 2.5)]);
            assert_eq!(g.neighbors(v(1)).unwrap(), vec![(v(3), 2.5)]);
            assert_eq!(g.neighbors(v(3)).unwrap(), vec![(v(1), 2.5)]);
            assert!(g.neighbors(v(2)).unwrap().is_empty());
        }
    }

    #[test]
    fn test_unweighted_edges_have_unit_weight() {
        for kind in BackendKind::ALL {
            let g = make_graph(kind, 2, false, &[(1, 2, 0.0)]);
            assert_eq!(g.neighbors(v(2)).unwrap(), vec![(v(1), 1.0)]);
        }
    }

    // --- Vertex validation ---

    #[test]
    fn test_vertex_label_range() {
        let g = Graph::with_kind(BackendKind::List, 5, false).unwrap();
        assert_eq!(g.vertex(1).unwrap(), v(1));
        assert_eq!(g.vertex(5).unwrap(), v(5));
        assert!(matches!(g.vertex(0), Err(GraphError::UnknownVertex { label: 0, .. })));
        assert!(matches!(g.vertex(6), Err(GraphError::UnknownVertex { label: 6, .. })));
    }

    #[test]
    fn test_traversals_reject_unknown_origin() {
        for kind in BackendKind::ALL {
            let g = two_triangles(kind);
            let outside = v(7);
            assert!(matches!(
                g.breadth_first_search(outside),
                Err(GraphError::UnknownVertex { label: 7, .. })
            ));
            assert!(g.depth_first_search(outside).is_err());
            assert!(g.dijkstra(outside).is_err());
            assert!(g.find_minimum_path(outside, v(1)).is_err());
            assert!(g.find_minimum_path(v(1), outside).is_err());
        }
    }

    // --- Degree ---

    #[test]
    fn test_degree_table_and_sum() {
        for kind in BackendKind::ALL {
            let g = two_triangles(kind);
            assert_eq!(g.degree_table(), vec![2; 6]);
            assert_eq!(g.degree_table().iter().sum::<usize>(), 2 * g.edge_count());
        }
    }

    // --- Minimum path ---

    #[test]
    fn test_min_path_weighted_detour() {
        for kind in BackendKind::ALL {
            let g = make_graph(kind, 4, true, &[(1, 2, 1.0), (2, 3, 2.0), (1, 3, 5.0)]);
            let path = g.find_minimum_path(v(1), v(3)).unwrap().unwrap();
            assert_eq!(path.vertices(), vec![v(1), v(2), v(3)]);
            assert_eq!(path.total_distance(), 3.0);
            assert_eq!(path.hops(), 2);
            assert!(!path.negative_weights);
        }
    }

    #[test]
    fn test_min_path_unweighted_hops() {
        for kind in BackendKind::ALL {
            let edges: Vec<(usize, usize, f64)> = (1..=6).map(|i| (i, i % 6 + 1, 0.0)).collect();
            let g = make_graph(kind, 6, false, &edges);
            let path = g.find_minimum_path(v(1), v(4)).unwrap().unwrap();
            assert_eq!(path.hops(), 3);
            assert_eq!(path.total_distance(), 3.0);
            assert_eq!(path.origin(), Some(v(1)));
            assert_eq!(path.destination(), Some(v(4)));
        }
    }

    #[test]
    fn test_min_path_unreachable_is_none() {
        for kind in BackendKind::ALL {
            let g = two_triangles(kind);
            assert!(g.find_minimum_path(v(1), v(4)).unwrap().is_none());
        }
    }

    #[test]
    fn test_min_path_to_self() {
        for kind in BackendKind::ALL {
            let g = make_graph(kind, 2, true, &[(1, 2, 4.0)]);
            let path = g.find_minimum_path(v(2), v(2)).unwrap().unwrap();
            assert_eq!(path.vertices(), vec![v(2)]);
            assert_eq!(path.total_distance(), 0.0);
        }
    }

    #[test]
    fn test_min_path_negative_weight_still_runs() {
        for kind in BackendKind::ALL {
            let g = make_graph(kind, 3, true, &[(1, 2, 2.0), (2, 3, -1.0)]);
            assert!(g.has_negative_weights());
            let path = g.find_minimum_path(v(1), v(3)).unwrap().unwrap();
            assert!(path.negative_weights);
            assert_eq!(path.destination(), Some(v(3)));
        }
    }

    // --- Components ---

    #[test]
    fn test_components_partition() {
        for kind in BackendKind::ALL {
            let g = two_triangles(kind);
            let comps = g.find_connected_components();
            assert_eq!(comps.len(), 2);
            assert_eq!(comps[0], [v(1), v(2), v(3)].into_iter().collect());
            assert_eq!(comps[1], [v(4), v(5), v(6)].into_iter().collect());
        }
    }

    #[test]
    fn test_edge_weight_lookup() {
        for kind in BackendKind::ALL {
            let g = make_graph(kind, 3, true, &[(1, 3, 2.5), (3, 1, 4.0)]);
            assert_eq!(g.edge_weight(v(3), v(1)).unwrap(), Some(4.0));
            assert_eq!(g.edge_weight(v(1), v(2)).unwrap(), None);
            assert!(g.edge_weight(v(1), v(9)).is_err());
            assert_eq!(g.edge_count(), 1);
        }
    }

    #[test]
    fn test_rejected_insert_leaves_graph_unchanged() {
        for kind in BackendKind::ALL {
            let mut g = make_graph(kind, 3, false, &[(1, 2, 0.0)]);
            for (a, b) in [(1, 8), (8, 1), (8, 8)] {
                let err = g.insert_edge(Edge::unweighted(v(a), v(b))).unwrap_err();
                assert!(matches!(err, GraphError::UnknownVertex { label: 8, .. }));
            }
            assert_eq!(g.edge_count(), 1);
            assert_eq!(g.degree_table().iter().sum::<usize>(), 2);
            assert_eq!(g.find_connected_components().len(), 2);
        }
    }

    #[test]
    fn test_origin_past_every_backend_bound() {
        // Far outside the list's rows and the matrix's width.
        for kind in BackendKind::ALL {
            let g = make_graph(kind, 3, true, &[(1, 2, 1.0)]);
            let outside = VertexId::new(1_000);
            for err in [
                g.breadth_first_search(outside).err(),
                g.depth_first_search(outside).err(),
                g.dijkstra(outside).err(),
                g.neighbors(outside).err(),
            ] {
                assert_eq!(
                    err,
                    Some(GraphError::UnknownVertex {
                        label: 1_001,
                        vertices_num: 3
                    })
                );
            }
        }
    }

    #[test]
    fn test_memory_grows_on_both_backends() {
        for kind in BackendKind::ALL {
            let mut g = Graph::with_kind(kind, 500, false).unwrap();
            let empty = g.memory_usage();
            for i in 1..500 {
                g.insert_edge(Edge::unweighted(v(i), v(i + 1))).unwrap();
            }
            assert!(g.memory_usage() > empty, "{}", kind);
        }
    }

    #[test]
    fn test_memory_matrix_vs_list() {
        // Sparse and wide: list pays a row header per vertex, the
        // dictionary-of-keys matrix only pays for stored cells.
        let edges = [(1, 2, 0.0), (2, 3, 0.0)];
        let m = make_graph(BackendKind::Matrix, 10_000, false, &edges);
        let l = make_graph(BackendKind::List, 10_000, false, &edges);
        assert!(l.memory_usage() > 10_000 * std::mem::size_of::<Vec<(VertexId, f64)>>());
        assert!(m.memory_usage() * 100 < l.memory_usage());

        // Every vertex touched: matrix holds two cells per edge while the
        // list holds two entries per edge plus its headers.
        let edges: Vec<(usize, usize, f64)> = (1..2_000).map(|i| (i, i + 1, 0.0)).collect();
        let m = make_graph(BackendKind::Matrix, 2_000, false, &edges);
        let l = make_graph(BackendKind::List, 2_000, false, &edges);
        let cell = std::mem::size_of::<(u32, u32)>() + std::mem::size_of::<f64>();
        let entry = std::mem::size_of::<(VertexId, f64)>();
        assert!(m.memory_usage() >= 2 * 1_999 * cell);
        assert!(l.memory_usage() >= 2 * 1_999 * entry);
    }
}
