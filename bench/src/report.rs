//! Text reports: degree tables, search tables and path files.

use std::fs;
use std::path::{Path as FsPath, PathBuf};

use anyhow::Context;
use graph_repr_core::{BackendKind, Graph, Path, TraversalResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Breadth,
    Depth,
}

impl SearchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Breadth => "breadth",
            SearchKind::Depth => "depth",
        }
    }
}

pub fn degree_file_name(kind: BackendKind) -> String {
    format!("graph_{}_out.txt", kind)
}

pub fn search_file_name(kind: BackendKind, search: SearchKind) -> String {
    format!("graph_{}_{}_search_out.txt", kind, search.as_str())
}

/// Decimal digit count, at least 1.
fn digits(n: usize) -> usize {
    n.max(1).to_string().len()
}

/// `# n = V`, `# m = E`, then `"<vertex> <degree>"` per vertex.
pub fn degree_report(graph: &Graph) -> String {
    let mut out = format!("# n = {}\n# m = {}\n", graph.vertices_num(), graph.edge_count());
    for (i, degree) in graph.degree_table().into_iter().enumerate() {
        out.push_str(&format!("{} {}\n", i + 1, degree));
    }
    out
}

/// Parent/level table in visit order, columns right-aligned.
pub fn search_table(vertices_num: usize, result: &TraversalResult) -> String {
    let w = digits(vertices_num);
    let lw = digits(result.max_level() as usize);
    let mut out = String::new();
    for (vertex, visit) in result.iter() {
        let line = match visit.parent {
            None => format!(
                "{:>w$}: {:^rw$} | Level = {:>lw$}\n",
                vertex,
                "Root",
                visit.level,
                w = w,
                rw = w + 9,
                lw = lw
            ),
            Some(parent) => format!(
                "{:>w$}: Parent = {:>w$} | Level = {:>lw$}\n",
                vertex,
                parent,
                visit.level,
                w = w,
                lw = lw
            ),
        };
        out.push_str(&line);
    }
    out
}

pub fn path_report(path: &Path) -> String {
    let steps: Vec<String> = path
        .steps
        .iter()
        .map(|s| format!("{} ({:.2})", s.vertex, s.distance))
        .collect();
    let mut out = format!("Complete path:\n{}\n", steps.join(" -> "));
    if let Some(last) = path.steps.last() {
        out.push_str(&format!(
            "Destination = {} | Total distance = {:?}\n",
            last.vertex, last.distance
        ));
    }
    out
}

/// Write `contents` to `dir/name`, creating `dir` if needed.
pub fn write_report(dir: &FsPath, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}
