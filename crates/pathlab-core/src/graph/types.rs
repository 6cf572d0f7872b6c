use serde::Serialize;

/// Dense vertex index in `0..vertex_count`
pub type VertexId = usize;

/// Result of a single shortest-path query
///
/// A found path lists every vertex from source to destination inclusive.
/// The "no path" value has no vertices and an infinite cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    pub vertices: Vec<VertexId>,
    pub total_cost: f64,
}

impl Path {
    pub fn new(vertices: Vec<VertexId>, total_cost: f64) -> Self {
        Path {
            vertices,
            total_cost,
        }
    }

    /// The unreachable sentinel
    pub fn not_found() -> Self {
        Path {
            vertices: Vec::new(),
            total_cost: f64::INFINITY,
        }
    }

    pub fn found(&self) -> bool {
        self.total_cost.is_finite()
    }

    /// Number of vertices on the path (0 when not found)
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of edges traversed
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<VertexId> {
        self.vertices.first().copied()
    }

    pub fn destination(&self) -> Option<VertexId> {
        self.vertices.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_sentinel() {
        let path = Path::not_found();
        assert!(!path.found());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.hops(), 0);
        assert!(path.total_cost.is_infinite());
        assert_eq!(path.source(), None);
    }

    #[test]
    fn test_found_path_accessors() {
        let path = Path::new(vec![0, 3, 4], 2.5);
        assert!(path.found());
        assert_eq!(path.len(), 3);
        assert_eq!(path.hops(), 2);
        assert_eq!(path.source(), Some(0));
        assert_eq!(path.destination(), Some(4));
    }

    #[test]
    fn test_single_vertex_path() {
        let path = Path::new(vec![7], 0.0);
        assert!(path.found());
        assert_eq!(path.hops(), 0);
        assert_eq!(path.source(), path.destination());
    }
}
