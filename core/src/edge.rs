use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;

/// Dense 0-based vertex index.
///
/// Vertices are labelled `1..=N` at the I/O boundary; `Display` and
/// `FromStr` speak labels, everything else speaks indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(u32);

impl VertexId {
    /// Largest index representable by a `VertexId`.
    pub const MAX_INDEX: usize = u32::MAX as usize;

    /// Build from a 0-based index.
    ///
    /// Panics if `index` exceeds [`VertexId::MAX_INDEX`]; `Graph` construction
    /// rejects vertex counts that could reach this.
    pub fn new(index: usize) -> Self {
        assert!(
            index <= Self::MAX_INDEX,
            "vertex index {} exceeded maximum {}",
            index,
            Self::MAX_INDEX
        );
        Self(index as u32)
    }

    /// Build from a 1-based display label. `None` for label 0.
    pub fn from_label(label: usize) -> Option<Self> {
        label
            .checked_sub(1)
            .filter(|&index| index <= Self::MAX_INDEX)
            .map(Self::new)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn label(self) -> usize {
        self.index() + 1
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Forward so width/alignment flags apply to the label.
        fmt::Display::fmt(&self.label(), f)
    }
}

impl FromStr for VertexId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(Self::from_label)
            .ok_or_else(|| GraphError::InvalidVertexLabel(s.to_string()))
    }
}

/// One undirected relation between two vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    src: VertexId,
    dest: VertexId,
    weight: Option<f64>,
}

impl Edge {
    pub fn new(src: VertexId, dest: VertexId, weight: Option<f64>) -> Self {
        Self { src, dest, weight }
    }

    pub fn unweighted(src: VertexId, dest: VertexId) -> Self {
        Self {
            src,
            dest,
            weight: None,
        }
    }

    pub fn weighted(src: VertexId, dest: VertexId, weight: f64) -> Self {
        Self {
            src,
            dest,
            weight: Some(weight),
        }
    }

    #[inline]
    pub fn src(&self) -> VertexId {
        self.src
    }

    #[inline]
    pub fn dest(&self) -> VertexId {
        self.dest
    }

    #[inline]
    pub fn weight(&self) -> Option<f64> {
        self.weight
    }

    pub fn endpoints(&self) -> (VertexId, VertexId) {
        (self.src, self.dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        let v = VertexId::new(0);
        assert_eq!(v.label(), 1);
        assert_eq!(VertexId::from_label(1), Some(v));
        assert_eq!(VertexId::from_label(0), None);
    }

    #[test]
    fn test_display_uses_label_and_width() {
        let v = VertexId::new(6);
        assert_eq!(v.to_string(), "7");
        assert_eq!(format!("{:>3}", v), "  7");
    }

    #[test]
    fn test_parse_label() {
        assert_eq!("12".parse::<VertexId>().unwrap().index(), 11);
        assert_eq!(" 3 ".parse::<VertexId>().unwrap().index(), 2);
    }

    #[test]
    fn test_parse_rejects_zero_and_text() {
        assert!(matches!(
            "0".parse::<VertexId>(),
            Err(GraphError::InvalidVertexLabel(_))
        ));
        assert!(matches!(
            "abc".parse::<VertexId>(),
            Err(GraphError::InvalidVertexLabel(_))
        ));
    }

    #[test]
    fn test_edge_constructors() {
        let a = VertexId::new(0);
        let b = VertexId::new(1);
        assert_eq!(Edge::unweighted(a, b).weight(), None);
        assert_eq!(Edge::weighted(a, b, 2.5).weight(), Some(2.5));
        assert_eq!(Edge::weighted(a, b, 2.5).endpoints(), (a, b));
        assert_eq!(Edge::new(b, a, None), Edge::unweighted(b, a));
        let e = Edge::new(b, a, None);
        assert_eq!((e.src(), e.dest()), (b, a));
    }
}
