use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap, VecDeque};

use tracing::debug;

use crate::backend::Adjacency;
use crate::edge::VertexId;

/// How a vertex was reached during BFS/DFS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    /// `None` for the traversal root.
    pub parent: Option<VertexId>,
    pub level: u32,
}

/// Parent/level table produced by one BFS or DFS run.
///
/// Indexed by vertex; vertices not reached from the origin are absent.
/// Iteration follows the order in which vertices were taken off the worklist.
#[derive(Debug, Clone)]
pub struct TraversalResult {
    origin: VertexId,
    visits: Vec<Option<Visit>>,
    order: Vec<VertexId>,
}

impl TraversalResult {
    pub fn origin(&self) -> VertexId {
        self.origin
    }

    pub fn get(&self, v: VertexId) -> Option<&Visit> {
        self.visits.get(v.index()).and_then(Option::as_ref)
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.get(v).is_some()
    }

    /// Number of vertices reached, including the origin.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visited vertices in visit order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Visit)> + '_ {
        self.order
            .iter()
            .filter_map(move |&v| self.get(v).map(|visit| (v, *visit)))
    }

    pub fn visited(&self) -> BTreeSet<VertexId> {
        self.order.iter().copied().collect()
    }

    pub fn max_level(&self) -> u32 {
        self.iter().map(|(_, visit)| visit.level).max().unwrap_or(0)
    }

    /// Walk parent pointers from `target` back to the origin.
    ///
    /// Returns the origin-first vertex sequence, or None if `target` was
    /// never reached.
    pub fn path_to(&self, target: VertexId) -> Option<Vec<VertexId>> {
        self.get(target)?;
        let mut path = vec![target];
        let mut current = target;
        while let Some(parent) = self.get(current).and_then(|visit| visit.parent) {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        Some(path)
    }

    /// Like `path_to`, but each step carries its hop count from the origin.
    pub fn hop_path_to(&self, target: VertexId) -> Option<Vec<PathStep>> {
        let path = self.path_to(target)?;
        Some(
            path.into_iter()
                .enumerate()
                .map(|(hops, vertex)| PathStep {
                    vertex,
                    distance: hops as f64,
                })
                .collect(),
        )
    }
}

/// A vertex finalized by Dijkstra.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settled {
    pub parent: Option<VertexId>,
    pub distance: f64,
}

/// Single-source shortest path tree.
///
/// Unreachable vertices are absent rather than present at infinity.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    origin: VertexId,
    settled: Vec<Option<Settled>>,
    order: Vec<VertexId>,
    negative_weights: bool,
}

impl ShortestPaths {
    pub fn origin(&self) -> VertexId {
        self.origin
    }

    pub fn get(&self, v: VertexId) -> Option<&Settled> {
        self.settled.get(v.index()).and_then(Option::as_ref)
    }

    pub fn distance(&self, v: VertexId) -> Option<f64> {
        self.get(v).map(|s| s.distance)
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.get(v).is_some()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Settled vertices in finalization (non-decreasing distance) order.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, Settled)> + '_ {
        self.order
            .iter()
            .filter_map(move |&v| self.get(v).map(|s| (v, *s)))
    }

    /// The graph held a negative weight when this tree was computed, so
    /// distances may not be minimal.
    pub fn negative_weights(&self) -> bool {
        self.negative_weights
    }

    /// Origin-first path to `target` with cumulative distances.
    pub fn path_to(&self, target: VertexId) -> Option<Vec<PathStep>> {
        let mut current = target;
        let mut settled = *self.get(current)?;
        let mut steps = Vec::new();
        loop {
            steps.push(PathStep {
                vertex: current,
                distance: settled.distance,
            });
            match settled.parent {
                Some(parent) => {
                    current = parent;
                    settled = *self.get(parent)?;
                }
                None => break,
            }
        }
        steps.reverse();
        Some(steps)
    }
}

/// One vertex on a reconstructed minimum path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    pub vertex: VertexId,
    /// Cumulative weight from the origin, or hop count for unweighted graphs.
    pub distance: f64,
}

/// Minimum path between two vertices, origin first.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    pub steps: Vec<PathStep>,
    /// Copied from the Dijkstra run; always false for BFS-derived paths.
    pub negative_weights: bool,
}

impl Path {
    pub fn origin(&self) -> Option<VertexId> {
        self.steps.first().map(|s| s.vertex)
    }

    pub fn destination(&self) -> Option<VertexId> {
        self.steps.last().map(|s| s.vertex)
    }

    pub fn total_distance(&self) -> f64 {
        self.steps.last().map(|s| s.distance).unwrap_or(0.0)
    }

    pub fn hops(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn vertices(&self) -> Vec<VertexId> {
        self.steps.iter().map(|s| s.vertex).collect()
    }
}

/// FIFO for BFS, LIFO for DFS.
trait Worklist<T> {
    fn put(&mut self, item: T);
    fn take(&mut self) -> Option<T>;
}

impl<T> Worklist<T> for VecDeque<T> {
    fn put(&mut self, item: T) {
        self.push_back(item);
    }

    fn take(&mut self) -> Option<T> {
        self.pop_front()
    }
}

impl<T> Worklist<T> for Vec<T> {
    fn put(&mut self, item: T) {
        self.push(item);
    }

    fn take(&mut self) -> Option<T> {
        self.pop()
    }
}

/// Shared BFS/DFS loop.
///
/// A vertex is marked as queued when pushed and is never pushed again, so
/// each vertex is taken exactly once and recorded with the parent/level it
/// was pushed with.
fn explore<A, W>(graph: &A, origin: VertexId, mut worklist: W) -> TraversalResult
where
    A: Adjacency + ?Sized,
    W: Worklist<(VertexId, Option<VertexId>, u32)>,
{
    let n = graph.vertex_count();
    let mut visits: Vec<Option<Visit>> = vec![None; n];
    let mut queued = vec![false; n];
    let mut order = Vec::new();

    queued[origin.index()] = true;
    worklist.put((origin, None, 0));

    while let Some((current, parent, level)) = worklist.take() {
        visits[current.index()] = Some(Visit { parent, level });
        order.push(current);

        for (next, _) in graph.neighbors(current) {
            if !queued[next.index()] {
                queued[next.index()] = true;
                worklist.put((next, Some(current), level + 1));
            }
        }
    }

    TraversalResult {
        origin,
        visits,
        order,
    }
}

/// Breadth-first search from `origin`. Levels are hop distances.
pub(crate) fn breadth_first_search<A: Adjacency + ?Sized>(graph: &A, origin: VertexId) -> TraversalResult {
    let result = explore(graph, origin, VecDeque::new());
    debug!(origin = %origin, visited = result.len(), "bfs complete");
    result
}

/// Iterative stack-based pre-order traversal from `origin`.
///
/// A neighbor is pushed at `level + 1` of the vertex that discovered it and
/// keeps that level even if it is popped via a longer route, so levels here
/// are discovery depths, not DFS tree depths.
pub(crate) fn depth_first_search<A: Adjacency + ?Sized>(graph: &A, origin: VertexId) -> TraversalResult {
    let result = explore(graph, origin, Vec::new());
    debug!(origin = %origin, visited = result.len(), "dfs complete");
    result
}

/// Min-heap entry: reversed ordering on distance, ties broken by vertex id.
#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    distance: f64,
    vertex: VertexId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Dijkstra over a binary heap with lazy deletion.
///
/// A vertex may sit in the heap several times; stale entries are skipped
/// when popped. The loop ends when the heap drains, so vertices in other
/// components are simply never settled.
pub(crate) fn dijkstra<A: Adjacency + ?Sized>(graph: &A, origin: VertexId) -> ShortestPaths {
    let n = graph.vertex_count();
    let mut best: Vec<Option<Settled>> = vec![None; n];
    let mut finalized = vec![false; n];
    let mut order = Vec::new();
    let mut heap = BinaryHeap::new();

    best[origin.index()] = Some(Settled {
        parent: None,
        distance: 0.0,
    });
    heap.push(HeapEntry {
        distance: 0.0,
        vertex: origin,
    });

    while let Some(HeapEntry { distance, vertex }) = heap.pop() {
        if finalized[vertex.index()] {
            continue;
        }
        finalized[vertex.index()] = true;
        order.push(vertex);

        for (next, weight) in graph.neighbors(vertex) {
            if finalized[next.index()] {
                continue;
            }
            let candidate = distance + weight;
            let improves = best[next.index()].map_or(true, |s| candidate < s.distance);
            if improves {
                best[next.index()] = Some(Settled {
                    parent: Some(vertex),
                    distance: candidate,
                });
                heap.push(HeapEntry {
                    distance: candidate,
                    vertex: next,
                });
            }
        }
    }

    let negative_weights = graph.min_weight().is_some_and(|w| w < 0.0);
    debug!(origin = %origin, settled = order.len(), "dijkstra complete");

    ShortestPaths {
        origin,
        settled: best,
        order,
        negative_weights,
    }
}

/// Partition all vertices into connected components.
///
/// The outer loop walks vertex ids in ascending order, so components come
/// out ordered by their smallest member.
pub(crate) fn connected_components<A: Adjacency + ?Sized>(graph: &A) -> Vec<BTreeSet<VertexId>> {
    let n = graph.vertex_count();
    let mut seen = vec![false; n];
    let mut components = Vec::new();
    let mut queue: VecDeque<VertexId> = VecDeque::new();

    for start in 0..n {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        queue.push_back(VertexId::new(start));

        let mut component = BTreeSet::new();
        while let Some(current) = queue.pop_front() {
            component.insert(current);
            for (next, _) in graph.neighbors(current) {
                if !seen[next.index()] {
                    seen[next.index()] = true;
                    queue.push_back(next);
                }
            }
        }
        components.push(component);
    }

    debug!(components = components.len(), "connected components complete");
    components
}
