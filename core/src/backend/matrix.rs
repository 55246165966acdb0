use std::collections::HashMap;
use std::mem::size_of;

use super::Adjacency;
use crate::edge::VertexId;

/// Sparse symmetric adjacency matrix in dictionary-of-keys form.
///
/// Only present cells are stored, but a row is always read by probing every
/// column `0..n`. Neighbor enumeration and degree are therefore O(V) per
/// vertex regardless of the actual degree.
///
/// Invariant: `cells[(i, j)] == cells[(j, i)]` for every stored cell.
#[derive(Debug, Clone)]
pub(crate) struct MatrixBackend {
    vertices_num: u32,
    cells: HashMap<(u32, u32), f64>,
    edge_count: usize,
}

impl MatrixBackend {
    /// `None` when `vertices_num` does not fit the `u32` cell keys.
    pub(crate) fn new(vertices_num: usize) -> Option<Self> {
        let vertices_num = u32::try_from(vertices_num).ok()?;
        Some(Self {
            vertices_num,
            cells: HashMap::new(),
            edge_count: 0,
        })
    }

    /// Number of stored cells (each off-diagonal edge occupies two).
    #[cfg(test)]
    fn stored_cells(&self) -> usize {
        self.cells.len()
    }

    fn key(row: VertexId, col: VertexId) -> (u32, u32) {
        (row.index() as u32, col.index() as u32)
    }
}

/// Column scan over one matrix row.
pub(crate) struct RowIter<'a> {
    cells: &'a HashMap<(u32, u32), f64>,
    row: u32,
    col: u32,
    width: u32,
}

impl Iterator for RowIter<'_> {
    type Item = (VertexId, f64);

    fn next(&mut self) -> Option<Self::Item> {
        while self.col < self.width {
            let col = self.col;
            self.col += 1;
            if let Some(&w) = self.cells.get(&(self.row, col)) {
                return Some((VertexId::new(col as usize), w));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some((self.width - self.col) as usize))
    }
}

impl Adjacency for MatrixBackend {
    type Neighbors<'a> = RowIter<'a>;

    fn vertex_count(&self) -> usize {
        self.vertices_num as usize
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
            self.vertices_num
        );
        if self.cells.insert(Self::key(src, dest), weight).is_none() {
            self.edge_count += 1;
        }
        self.cells.insert(Self::key(dest, src), weight);
    }

    fn neighbors(&self, v: VertexId) -> RowIter<'_> {
        RowIter {
            cells: &self.cells,
            row: v.index() as u32,
            col: 0,
            width: self.vertices_num,
        }
    }

    fn degree(&self, v: VertexId) -> usize {
        let row = v.index() as u32;
        (0..self.vertices_num)
            .filter(|&col| self.cells.contains_key(&(row, col)))
            .count()
    }

    fn weight(&self, a: VertexId, b: VertexId) -> Option<f64> {
        self.cells.get(&Self::key(a, b)).copied()
    }

    fn min_weight(&self) -> Option<f64> {
        self.cells.values().copied().reduce(f64::min)
    }

    fn memory_usage(&self) -> usize {
        // One control byte per bucket on top of key + value.
        let per_cell = size_of::<(u32, u32)>() + size_of::<f64>() + 1;
        size_of::<Self>() + self.cells.capacity() * per_cell
    }
}
