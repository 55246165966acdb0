//! Synthetic-topology benchmark: the same generated graph loaded into both
//! backends, timing load, BFS, Dijkstra and component discovery.

use std::collections::VecDeque;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use clap::ValueEnum;
use graph_repr_core::{BackendKind, Edge, VertexId};
use tracing::info;

use crate::input::EdgeList;
use crate::report::write_report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SynthMode {
    All,
    Lsystem,
    Scalefree,
    Smallworld,
    Random,
    Barbell,
    Dla,
}

type Generator = fn(usize) -> EdgeList;

impl SynthMode {
    fn generators(self) -> Vec<(&'static str, &'static str, Generator)> {
        let all: [(&'static str, &'static str, Generator); 6] = [
            ("lsystem", "L-system tree", gen_lsystem),
            ("scalefree", "Scale-free (edge sampling)", gen_scale_free),
            ("smallworld", "Small-world (Watts-Strogatz)", gen_small_world),
            ("random", "Erdos-Renyi random", gen_random),
            ("barbell", "Barbell (clique-bridge-clique)", gen_barbell),
            ("dla", "DLA (organic branching)", gen_dla),
        ];
        let wanted = match self {
            SynthMode::All => None,
            SynthMode::Lsystem => Some("lsystem"),
            SynthMode::Scalefree => Some("scalefree"),
            SynthMode::Smallworld => Some("smallworld"),
            SynthMode::Random => Some("random"),
            SynthMode::Barbell => Some("barbell"),
            SynthMode::Dla => Some("dla"),
        };
        all.into_iter()
            .filter(|(key, _, _)| wanted.map_or(true, |w| w == *key))
            .collect()
    }
}

/// Generate each requested topology and benchmark it on both backends.
///
/// With `write_dir`, each generated edge list is also saved as
/// `synth_<mode>.txt` for later use with `describe` or `study`.
pub fn run_synth(mode: SynthMode, vertices: usize, write_dir: Option<&Path>) -> anyhow::Result<()> {
    println!("graph-repr-bench synth");
    println!("======================");
    println!();

    for (key, name, generator) in mode.generators() {
        let t = Instant::now();
        let list = generator(vertices);
        println!("--- {} ---", name);
        println!(
            "Generated in {:.2}s: {} vertices, {} edge records",
            t.elapsed().as_secs_f64(),
            list.vertices_num,
            list.edges.len()
        );

        if let Some(dir) = write_dir {
            let path = write_report(dir, &format!("synth_{}.txt", key), &list.to_string())?;
            info!(path = %path.display(), "wrote generated edge list");
        }

        println!();
        println!(
            "{:>8} {:>10} {:>10} {:>10} {:>12} {:>12}",
            "backend", "load", "memory", "bfs", "dijkstra", "components"
        );
        println!(
            "{:->8} {:->10} {:->10} {:->10} {:->12} {:->12}",
            "", "", "", "", "", ""
        );

        for kind in BackendKind::ALL {
            bench_backend(kind, &list).with_context(|| format!("{} on {}", name, kind))?;
        }
        println!();
    }

    Ok(())
}

fn bench_backend(kind: BackendKind, list: &EdgeList) -> anyhow::Result<()> {
    let t = Instant::now();
    let graph = list.build(kind)?;
    let load = t.elapsed();

    let origin = VertexId::new(0);

    let t = Instant::now();
    let bfs = graph.breadth_first_search(origin)?;
    let bfs_time = t.elapsed();

    let t = Instant::now();
    let tree = graph.dijkstra(origin)?;
    let dijkstra_time = t.elapsed();

    let t = Instant::now();
    let components = graph.find_connected_components();
    let components_time = t.elapsed();

    println!(
        "{:>8} {:>8.1}ms {:>8.0}KB {:>8.1}ms {:>10.1}ms {:>12}",
        kind.as_str(),
        load.as_secs_f64() * 1000.0,
        graph.memory_usage() as f64 / 1024.0,
        bfs_time.as_secs_f64() * 1000.0,
        dijkstra_time.as_secs_f64() * 1000.0,
        components.len()
    );
    info!(
        backend = %kind,
        bfs_visited = bfs.len(),
        settled = tree.len(),
        components_ms = components_time.as_secs_f64() * 1000.0,
        "backend benchmarked"
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Generators: deterministic, single-threaded, weights in [1, 10)
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.0 >> 33) % max as u64) as usize
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
    fn weight(&mut self) -> f64 {
        1.0 + self.next_f64() * 9.0
    }
}

struct Builder {
    vertices_num: usize,
    edges: Vec<Edge>,
    rng: FastRng,
}

impl Builder {
    fn new(vertices_num: usize, seed: u64) -> Self {
        Self {
            vertices_num,
            edges: Vec::new(),
            rng: FastRng::new(seed),
        }
    }

    fn link(&mut self, a: usize, b: usize) {
        let w = self.rng.weight();
        self.edges
            .push(Edge::weighted(VertexId::new(a), VertexId::new(b), w));
    }

    fn finish(self) -> EdgeList {
        EdgeList {
            vertices_num: self.vertices_num,
            weighted: true,
            edges: self.edges,
        }
    }
}

/// L-system fractal tree: every vertex spawns three children.
///
/// Deep (log-depth) paths with exponential width.
fn gen_lsystem(n: usize) -> EdgeList {
    let mut b = Builder::new(n, 42);
    let branching = 3;
    let mut next_id = 1;
    let mut frontier = vec![0usize];

    while next_id < n && !frontier.is_empty() {
        let mut next_frontier = Vec::with_capacity(frontier.len() * branching);
        for &parent in &frontier {
            for _ in 0..branching {
                if next_id >= n {
                    break;
                }
                b.link(parent, next_id);
                next_frontier.push(next_id);
                next_id += 1;
            }
        }
        frontier = next_frontier;
    }
    b.finish()
}

/// Scale-free via edge-endpoint sampling: high-degree vertices attract more
/// edges. Produces hubs.
fn gen_scale_free(n: usize) -> EdgeList {
    let mut b = Builder::new(n, 12345);
    let edges_per_vertex = 5;
    let seed = 5.min(n);
    let mut endpoints: Vec<usize> = Vec::with_capacity(n * edges_per_vertex * 2);

    for i in 0..seed {
        for j in (i + 1)..seed {
            b.link(i, j);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_vertex in seed..n {
        for _ in 0..edges_per_vertex.min(new_vertex) {
            if endpoints.is_empty() {
                break;
            }
            let target = endpoints[b.rng.next(endpoints.len())];
            if target != new_vertex {
                b.link(new_vertex, target);
                endpoints.push(new_vertex);
                endpoints.push(target);
            }
        }
    }
    b.finish()
}

/// Watts-Strogatz: ring lattice with K neighbors per side, each edge
/// rewired with probability p.
fn gen_small_world(n: usize) -> EdgeList {
    let mut b = Builder::new(n, 67890);
    let k = 5;
    let p = 0.05;

    for i in 0..n {
        for j in 1..=k {
            let neighbor = (i + j) % n;
            if b.rng.next_f64() < p {
                let rewired = b.rng.next(n);
                if rewired != i {
                    b.link(i, rewired);
                    continue;
                }
            }
            if neighbor != i {
                b.link(i, neighbor);
            }
        }
    }
    b.finish()
}

/// Erdos-Renyi: ~5 uniform random edges per vertex. Sparse graphs of this
/// density usually leave a few isolated vertices.
fn gen_random(n: usize) -> EdgeList {
    let mut b = Builder::new(n, 54321);
    if n < 2 {
        return b.finish();
    }
    for _ in 0..n * 5 {
        let from = b.rng.next(n);
        let to = b.rng.next(n);
        if from != to {
            b.link(from, to);
        }
    }
    b.finish()
}

/// Two dense clusters joined by a thin chain of bridge vertices.
fn gen_barbell(n: usize) -> EdgeList {
    let mut b = Builder::new(n, 99999);
    let bridge_len = 10.min(n);
    let clique = (n - bridge_len) / 2;
    let b_start = clique + bridge_len;

    for offset in [0, b_start] {
        for i in 0..clique {
            for _ in 0..10.min(clique.saturating_sub(1)) {
                let target = b.rng.next(clique);
                if target != i {
                    b.link(offset + i, offset + target);
                }
            }
        }
    }

    // Chain: last of A -> bridge -> first of B.
    for i in 0..bridge_len {
        let id = clique + i;
        if i == 0 {
            if clique > 0 {
                b.link(clique - 1, id);
            }
        } else {
            b.link(id - 1, id);
        }
    }
    if clique > 0 && bridge_len > 0 {
        b.link(b_start - 1, b_start);
    }
    b.finish()
}

/// Diffusion-limited aggregation: each vertex attaches to a recent
/// "surface" vertex, with an occasional long-range shortcut.
fn gen_dla(n: usize) -> EdgeList {
    let mut b = Builder::new(n, 77777);
    let surface_max = 1000;
    let mut surface: VecDeque<usize> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_vertex in 1..n {
        let attach_to = surface[b.rng.next(surface.len())];
        b.link(new_vertex, attach_to);

        if b.rng.next(10) == 0 && new_vertex > 1 {
            let other = b.rng.next(new_vertex);
            if other != attach_to {
                b.link(new_vertex, other);
            }
        }

        surface.push_back(new_vertex);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }
    b.finish()
}
