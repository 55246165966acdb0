use thiserror::Error;

use crate::edge::VertexId;

/// Errors surfaced by graph construction, insertion and queries.
///
/// An unreachable destination is not an error: path queries return `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// Backend kind name is neither `matrix` nor `list`.
    #[error("unrecognized backend kind '{0}', expected 'matrix' or 'list'")]
    Config(String),

    #[error("graph supports at most {max} vertices, got {requested}")]
    VertexLimit { requested: usize, max: usize },

    /// Weighted graph received an edge with no weight.
    #[error("edge {src}-{dest} has no weight but the graph is weighted")]
    MissingWeight { src: VertexId, dest: VertexId },

    /// Unweighted graph received an edge carrying a weight.
    #[error("edge {src}-{dest} carries weight {weight} but the graph is unweighted")]
    UnexpectedWeight {
        src: VertexId,
        dest: VertexId,
        weight: f64,
    },

    #[error("edge {src}-{dest} has non-finite weight {weight}")]
    InvalidWeight {
        src: VertexId,
        dest: VertexId,
        weight: f64,
    },

    /// Vertex label outside `[1, vertices_num]`.
    #[error("vertex {label} is not in the graph (valid range 1..={vertices_num})")]
    UnknownVertex { label: usize, vertices_num: usize },

    #[error("'{0}' is not a vertex label (expected an integer >= 1)")]
    InvalidVertexLabel(String),
}

impl GraphError {
    /// True for both halves of the weighted/unweighted consistency check.
    pub fn is_weight_mismatch(&self) -> bool {
        matches!(
            self,
            GraphError::MissingWeight { .. } | GraphError::UnexpectedWeight { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
