use std::mem::size_of;

use super::Adjacency;
use crate::edge::VertexId;

/// Adjacency list: one `(neighbor, weight)` vector per vertex.
///
/// Neighbor enumeration is O(deg(v)). Insertion scans the two affected
/// vectors so a repeated pair overwrites its weight instead of adding a
/// second entry.
///
/// Invariant: `(u, w) ∈ adj[v]` iff `(v, w) ∈ adj[u]`.
#[derive(Debug, Clone)]
pub(crate) struct ListBackend {
    adj: Vec<Vec<(VertexId, f64)>>,
    edge_count: usize,
}

impl ListBackend {
    pub(crate) fn new(vertices_num: usize) -> Self {
        Self {
            adj: vec![Vec::new(); vertices_num],
            edge_count: 0,
        }
    }

    /// Set or overwrite `target` in `from`'s list. Returns true if it was new.
    fn upsert(&mut self, from: VertexId, target: VertexId, weight: f64) -> bool {
        let row = &mut self.adj[from.index()];
        match row.iter_mut().find(|(n, _)| *n == target) {
            Some(entry) => {
                entry.1 = weight;
                false
            }
            None => {
                row.push((target, weight));
                true
            }
        }
    }
}

impl Adjacency for ListBackend {
    type Neighbors<'a> = std::iter::Copied<std::slice::Iter<'a, (VertexId, f64)>>;

    fn vertex_count(&self) -> usize {
        self.adj.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn insert(&mut self, src: VertexId, dest: VertexId, weight: f64) {
        debug_assert!(
            src.index() < self.vertex_count() && dest.index() < self.vertex_count(),
            "edge {}-{} outside {} vertices",
            src,
            dest,
            self.vertex_count()
        );
        if self.upsert(src, dest, weight) {
            self.edge_count += 1;
        }
        if src != dest {
            self.upsert(dest, src, weight);
        }
    }

    fn neighbors(&self, v: VertexId) -> Self::Neighbors<'_> {
        self.adj[v.index()].iter().copied()
    }

    fn degree(&self, v: VertexId) -> usize {
        self.adj[v.index()].len()
    }

    fn weight(&self, a: VertexId, b: VertexId) -> Option<f64> {
        self.adj[a.index()]
            .iter()
            .find(|(n, _)| *n == b)
            .map(|&(_, w)| w)
    }

    fn min_weight(&self) -> Option<f64> {
        self.adj
            .iter()
            .flat_map(|row| row.iter().map(|&(_, w)| w))
            .reduce(f64::min)
    }

    fn memory_usage(&self) -> usize {
        let headers = self.adj.capacity() * size_of::<Vec<(VertexId, f64)>>();
        let entries: usize = self
            .adj
            .iter()
            .map(|row| row.capacity() * size_of::<(VertexId, f64)>())
            .sum();
        size_of::<Self>() + headers + entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(label: usize) -> VertexId {
        VertexId::from_label(label).unwrap()
    }

    #[test]
    fn test_insert_is_symmetric() {
        let mut l = ListBackend::new(3);
        l.insert(v(1), v(3), 4.0);
        assert_eq!(l.weight(v(1), v(3)), Some(4.0));
        assert_eq!(l.weight(v(3), v(1)), Some(4.0));
        assert_eq!(l.weight(v(1), v(2)), None);
        assert_eq!(l.edge_count(), 1);
    }

    #[test]
    fn test_reinsert_overwrites_weight() {
        let mut l = ListBackend::new(2);
        l.insert(v(1), v(2), 4.0);
        l.insert(v(2), v(1), 7.0);
        assert_eq!(l.degree(v(1)), 1);
        assert_eq!(l.degree(v(2)), 1);
        assert_eq!(l.weight(v(1), v(2)), Some(7.0));
        assert_eq!(l.edge_count(), 1);
    }

    #[test]
    fn test_neighbors_insertion_order() {
        let mut l = ListBackend::new(5);
        l.insert(v(3), v(5), 1.0);
        l.insert(v(3), v(1), 2.0);
        l.insert(v(3), v(4), 3.0);
        let row: Vec<usize> = l.neighbors(v(3)).map(|(n, _)| n.label()).collect();
        assert_eq!(row, vec![5, 1, 4]);
    }

    #[test]
    fn test_self_loop_stored_once() {
        let mut l = ListBackend::new(2);
        l.insert(v(2), v(2), 1.0);
        assert_eq!(l.degree(v(2)), 1);
        assert_eq!(l.edge_count(), 1);
    }

    #[test]
    fn test_min_weight() {
        let mut l = ListBackend::new(3);
        assert_eq!(l.min_weight(), None);
        l.insert(v(1), v(2), 3.0);
        l.insert(v(2), v(3), 0.5);
        assert_eq!(l.min_weight(), Some(0.5));
    }

    #[test]
    fn test_memory_grows_with_edges() {
        let mut l = ListBackend::new(100);
        let empty = l.memory_usage();
        for i in 1..100 {
            l.insert(v(i), v(i + 1), 1.0);
        }
        assert!(l.memory_usage() > empty);
    }

    #[test]
    fn test_memory_is_headers_plus_entries() {
        let header = size_of::<Vec<(VertexId, f64)>>();
        let entry = size_of::<(VertexId, f64)>();

        let mut l = ListBackend::new(1000);
        let empty = l.memory_usage();
        assert!(empty >= size_of::<ListBackend>() + 1000 * header);
        assert!(empty < size_of::<ListBackend>() + 2000 * header);

        for i in 1..1000 {
            l.insert(v(i), v(i + 1), 1.0);
        }
        // Each off-diagonal edge is two entries.
        assert!(l.memory_usage() >= empty + 2 * 999 * entry);
    }
}
