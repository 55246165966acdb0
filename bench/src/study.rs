//! `describe` and `study` runners over edge-list files.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context};
use graph_repr_core::{BackendKind, Graph};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{DescribeConfig, StudyConfig};
use crate::input::read_edge_list;
use crate::report::{
    degree_file_name, degree_report, path_report, search_file_name, search_table, write_report,
    SearchKind,
};

/// Write the degree report and BFS/DFS tables for each backend.
///
/// Returns the paths written.
pub fn run_describe(input: &Path, config: &DescribeConfig) -> anyhow::Result<Vec<PathBuf>> {
    let list = read_edge_list(input, config.weighted)?;
    let mut written = Vec::new();

    for &kind in &config.backends {
        let graph = list
            .build(kind)
            .with_context(|| format!("failed to build {} graph from {}", kind, input.display()))?;
        let origin = graph.vertex(config.origin)?;

        let path = write_report(&config.out_dir, &degree_file_name(kind), &degree_report(&graph))?;
        info!(backend = %kind, path = %path.display(), "wrote degree report");
        written.push(path);

        let searches = [
            (SearchKind::Breadth, graph.breadth_first_search(origin)?),
            (SearchKind::Depth, graph.depth_first_search(origin)?),
        ];
        for (search, result) in searches {
            let table = search_table(graph.vertices_num(), &result);
            let path = write_report(&config.out_dir, &search_file_name(kind, search), &table)?;
            info!(
                backend = %kind,
                search = search.as_str(),
                visited = result.len(),
                path = %path.display(),
                "wrote search table"
            );
            written.push(path);
        }
    }

    Ok(written)
}

#[derive(Debug, Serialize)]
pub struct StudySummary {
    pub graphs: Vec<GraphSummary>,
}

#[derive(Debug, Serialize)]
pub struct GraphSummary {
    pub index: usize,
    pub input: String,
    pub vertices: usize,
    pub edges: usize,
    pub components: usize,
    pub largest_component: usize,
    pub smallest_component: usize,
    pub memory_bytes: BTreeMap<String, usize>,
    pub queries: Vec<QuerySummary>,
}

#[derive(Debug, Serialize)]
pub struct QuerySummary {
    pub backend: String,
    pub origin: usize,
    pub destination: usize,
    pub seconds: f64,
    /// None when the destination is unreachable.
    pub distance: Option<f64>,
    pub hops: Option<usize>,
}

/// Time minimum-path queries on every backend for each input graph.
pub fn run_study(inputs: &[PathBuf], config: &StudyConfig) -> anyhow::Result<StudySummary> {
    if config.backends.is_empty() {
        bail!("no backends selected");
    }

    let mut graphs = Vec::with_capacity(inputs.len());

    for (i, input) in inputs.iter().enumerate() {
        let index = i + 1;
        let list = read_edge_list(input, config.weighted)?;

        let mut built: Vec<(BackendKind, Graph)> = Vec::with_capacity(config.backends.len());
        for &kind in &config.backends {
            let t = Instant::now();
            let graph = list
                .build(kind)
                .with_context(|| format!("failed to build {} graph from {}", kind, input.display()))?;
            info!(
                backend = %kind,
                graph = index,
                ms = t.elapsed().as_secs_f64() * 1000.0,
                "graph loaded"
            );
            built.push((kind, graph));
        }
        let reference = &built[0].1;

        let components = reference.find_connected_components();
        let largest = components.iter().map(BTreeSet::len).max().unwrap_or(0);
        let smallest = components.iter().map(BTreeSet::len).min().unwrap_or(0);
        println!(
            "graph_{}: {} vertices, {} edges, {} components (largest {}, smallest {})",
            index,
            reference.vertices_num(),
            reference.edge_count(),
            components.len(),
            largest,
            smallest
        );

        let origin = reference.vertex(config.origin)?;
        let mut queries = Vec::new();

        for &target in &config.targets {
            let end = match reference.vertex(target) {
                Ok(v) => v,
                Err(err) => {
                    warn!(graph = index, %err, "skipping target");
                    continue;
                }
            };

            for (kind, graph) in &built {
                let t = Instant::now();
                let path = graph.find_minimum_path(origin, end)?;
                let seconds = t.elapsed().as_secs_f64();
                println!(
                    "{} - graph_{} - {}_to_{}: {:.2e}",
                    kind, index, origin, end, seconds
                );

                if let Some(path) = &path {
                    let dir = config
                        .out_dir
                        .join(kind.as_str())
                        .join(format!("graph_{}", index));
                    write_report(&dir, &format!("{}_to_{}.txt", origin, end), &path_report(path))?;
                }

                queries.push(QuerySummary {
                    backend: kind.to_string(),
                    origin: origin.label(),
                    destination: end.label(),
                    seconds,
                    distance: path.as_ref().map(|p| p.total_distance()),
                    hops: path.as_ref().map(|p| p.hops()),
                });
            }
        }

        graphs.push(GraphSummary {
            index,
            input: input.display().to_string(),
            vertices: reference.vertices_num(),
            edges: reference.edge_count(),
            components: components.len(),
            largest_component: largest,
            smallest_component: smallest,
            memory_bytes: built
                .iter()
                .map(|(kind, g)| (kind.to_string(), g.memory_usage()))
                .collect(),
            queries,
        });
    }

    let summary = StudySummary { graphs };
    if let Some(json_path) = &config.json {
        let text = serde_json::to_string_pretty(&summary)?;
        fs::write(json_path, text)
            .with_context(|| format!("failed to write {}", json_path.display()))?;
        info!(path = %json_path.display(), "wrote study summary");
    }
    Ok(summary)
}
