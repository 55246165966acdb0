//! Edge-list files.
//!
//! ```text
//! N
//! src dest [weight]
//! ...
//! ```
//! Labels are 1-based. Blank lines are ignored.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::Context;
use graph_repr_core::{BackendKind, Edge, Graph, GraphError, VertexId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input is empty; expected a vertex count on the first line")]
    Empty,

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("line {line}: {source}")]
    Vertex {
        line: usize,
        #[source]
        source: GraphError,
    },
}

/// Parsed contents of an edge-list file.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeList {
    pub vertices_num: usize,
    pub weighted: bool,
    pub edges: Vec<Edge>,
}

impl EdgeList {
    /// Load every edge into a fresh graph on the given backend.
    pub fn build(&self, kind: BackendKind) -> graph_repr_core::Result<Graph> {
        let mut graph = Graph::with_kind(kind, self.vertices_num, self.weighted)?;
        for edge in &self.edges {
            graph.insert_edge(*edge)?;
        }
        Ok(graph)
    }
}

impl fmt::Display for EdgeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.vertices_num)?;
        for edge in &self.edges {
            match edge.weight() {
                Some(w) => writeln!(f, "{} {} {}", edge.src(), edge.dest(), w)?,
                None => writeln!(f, "{} {}", edge.src(), edge.dest())?,
            }
        }
        Ok(())
    }
}

/// Parse edge-list text.
///
/// `weighted` forces the weight column on or off; `None` infers it from
/// the first edge line (three fields means weighted).
pub fn parse_edge_list(text: &str, weighted: Option<bool>) -> Result<EdgeList, InputError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (line, header) = lines.next().ok_or(InputError::Empty)?;
    let vertices_num: usize = header.parse().map_err(|_| InputError::Malformed {
        line,
        reason: format!("expected a vertex count, found '{}'", header),
    })?;

    let mut weighted = weighted;
    let mut edges = Vec::new();

    for (line, text) in lines {
        let fields: Vec<&str> = text.split_whitespace().collect();
        let is_weighted = *weighted.get_or_insert(fields.len() == 3);
        let expected = if is_weighted { 3 } else { 2 };
        if fields.len() != expected {
            return Err(InputError::Malformed {
                line,
                reason: format!("expected {} fields, found {}", expected, fields.len()),
            });
        }

        let src = parse_vertex(fields[0], line, vertices_num)?;
        let dest = parse_vertex(fields[1], line, vertices_num)?;
        let weight = if is_weighted {
            let w: f64 = fields[2].parse().map_err(|_| InputError::Malformed {
                line,
                reason: format!("invalid weight '{}'", fields[2]),
            })?;
            Some(w)
        } else {
            None
        };
        edges.push(Edge::new(src, dest, weight));
    }

    Ok(EdgeList {
        vertices_num,
        weighted: weighted.unwrap_or(false),
        edges,
    })
}

fn parse_vertex(field: &str, line: usize, vertices_num: usize) -> Result<VertexId, InputError> {
    let v: VertexId = field
        .parse()
        .map_err(|source| InputError::Vertex { line, source })?;
    if v.index() >= vertices_num {
        return Err(InputError::Vertex {
            line,
            source: GraphError::UnknownVertex {
                label: v.label(),
                vertices_num,
            },
        });
    }
    Ok(v)
}

pub fn read_edge_list(path: &Path, weighted: Option<bool>) -> anyhow::Result<EdgeList> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_edge_list(&text, weighted).with_context(|| format!("failed to parse {}", path.display()))
}
