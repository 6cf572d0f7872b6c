//! Remaining-cost estimates for goal-directed search
//!
//! A heuristic is a pure function of `(vertex, goal)`. It may capture graph
//! or embedding data at construction but never observes search progress.
//! Whether it is admissible is a property of each implementation.

use crate::graph::grid::GridGraph;
use crate::graph::types::VertexId;

/// Added to the cosine denominator so zero vectors do not divide by zero
pub const COSINE_EPSILON: f64 = 1e-12;

pub trait Heuristic {
    /// Estimated cost from `vertex` to `goal`, never negative
    fn estimate(&self, vertex: VertexId, goal: VertexId) -> f64;

    /// Stable label used in result rows
    fn name(&self) -> &'static str;
}

/// Always 0. Admissible and consistent; A* with it behaves like Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _vertex: VertexId, _goal: VertexId) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "zero"
    }
}

/// `|x1 - x2| + |y1 - y2|` between two grid cells.
///
/// Admissible and consistent on a 4-connected unit-cost grid.
#[derive(Debug, Clone, Copy)]
pub struct ManhattanHeuristic<'g> {
    grid: &'g GridGraph,
}

impl<'g> ManhattanHeuristic<'g> {
    pub fn new(grid: &'g GridGraph) -> Self {
        ManhattanHeuristic { grid }
    }
}

impl Heuristic for ManhattanHeuristic<'_> {
    fn estimate(&self, vertex: VertexId, goal: VertexId) -> f64 {
        let (x1, y1) = self.grid.coords(vertex);
        let (x2, y2) = self.grid.coords(goal);
        (x1.abs_diff(x2) + y1.abs_diff(y2)) as f64
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}

/// Cosine distance `1 - cos(embedding[u], embedding[goal])`.
///
/// Experimental: neither admissible nor consistent in general, so A* paths
/// found with it may be longer than optimal.
#[derive(Debug, Clone)]
pub struct EmbeddingCosineHeuristic {
    embeddings: Vec<Vec<f32>>,
}

impl EmbeddingCosineHeuristic {
    /// `embeddings[v]` is the vector for internal vertex `v`; all vectors
    /// share one dimension.
    pub fn new(embeddings: Vec<Vec<f32>>) -> Self {
        EmbeddingCosineHeuristic { embeddings }
    }

    pub fn len(&self) -> usize {
        self.embeddings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.embeddings.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.embeddings.first().map_or(0, Vec::len)
    }
}

impl Heuristic for EmbeddingCosineHeuristic {
    fn estimate(&self, vertex: VertexId, goal: VertexId) -> f64 {
        let a = &self.embeddings[vertex];
        let b = &self.embeddings[goal];
        let (mut dot, mut na, mut nb) = (0.0f64, 0.0f64, 0.0f64);
        for (&x, &y) in a.iter().zip(b.iter()) {
            let (x, y) = (f64::from(x), f64::from(y));
            dot += x * y;
            na += x * x;
            nb += y * y;
        }
        let cos = dot / (na.sqrt() * nb.sqrt() + COSINE_EPSILON);
        // cos can exceed 1 by rounding; estimates stay non-negative
        (1.0 - cos).max(0.0)
    }

    fn name(&self) -> &'static str {
        "embedding_cosine"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_always_zero() {
        let h = ZeroHeuristic;
        assert_eq!(h.estimate(0, 10), 0.0);
        assert_eq!(h.estimate(10, 10), 0.0);
        assert_eq!(h.name(), "zero");
    }

    #[test]
    fn test_manhattan_on_grid() {
        let grid = GridGraph::open(3, 3);
        let h = ManhattanHeuristic::new(&grid);
        assert_eq!(h.estimate(0, 8), 4.0);
        assert_eq!(h.estimate(8, 0), 4.0);
        assert_eq!(h.estimate(4, 4), 0.0);
        assert_eq!(h.estimate(2, 6), 4.0);
        assert_eq!(h.estimate(1, 4), 1.0);
    }

    #[test]
    fn test_manhattan_consistent_across_edges() {
        use crate::graph::Graph;
        let grid = GridGraph::new(4, 4, [(1, 1), (2, 2)]);
        let h = ManhattanHeuristic::new(&grid);
        for goal in 0..grid.vertex_count() {
            for u in 0..grid.vertex_count() {
                for v in grid.neighbors(u) {
                    assert!(h.estimate(u, goal) <= 1.0 + h.estimate(v, goal));
                }
            }
        }
    }

    #[test]
    fn test_cosine_identical_vectors_is_zero() {
        let h = EmbeddingCosineHeuristic::new(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
        assert!(h.estimate(0, 1).abs() < 1e-9);
        assert_eq!(h.dimension(), 2);
        assert_eq!(h.len(), 2);
    }

    #[test]
    fn test_cosine_orthogonal_and_opposite() {
        let h = EmbeddingCosineHeuristic::new(vec![
            vec![1.0, 0.0],
            vec![0.0, 1.0],
            vec![-1.0, 0.0],
        ]);
        assert!((h.estimate(0, 1) - 1.0).abs() < 1e-9);
        assert!((h.estimate(0, 2) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_cosine_zero_vector_does_not_divide_by_zero() {
        let h = EmbeddingCosineHeuristic::new(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
        let est = h.estimate(0, 1);
        assert!(est.is_finite());
        assert!((est - 1.0).abs() < 1e-9);
        assert!(h.estimate(0, 0).is_finite());
    }
}
