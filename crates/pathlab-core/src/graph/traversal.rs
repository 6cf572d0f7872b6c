use std::collections::HashMap;

use crate::graph::types::VertexId;

/// Read-only adjacency over dense vertex ids `0..vertex_count()`
///
/// Implementations are immutable after construction. Neighbor enumeration
/// writes into a caller-owned buffer, so a single graph can back several
/// searches running on different threads.
pub trait Graph {
    fn vertex_count(&self) -> usize;

    fn is_directed(&self) -> bool;

    fn is_weighted(&self) -> bool;

    /// External id to dense id mapping, for datasets with sparse original ids
    fn original_to_internal_id(&self) -> Option<&HashMap<u64, VertexId>> {
        None
    }

    /// Clear `out` and fill it with the neighbors of `u`, in a stable order.
    ///
    /// Duplicate neighbors are independent edges.
    fn neighbors_into(&self, u: VertexId, out: &mut Vec<VertexId>);

    /// Edge weight of `(u, v)`: 1.0 when unweighted, `f64::INFINITY` when
    /// no such edge exists.
    fn weight(&self, u: VertexId, v: VertexId) -> f64;

    fn has_edge(&self, u: VertexId, v: VertexId) -> bool;

    /// Clear `out` and fill it with `(neighbor, weight)` pairs of `u`, in the
    /// same order as `neighbors_into`.
    ///
    /// The default looks each weight up through `weight`, so duplicate edges
    /// share the first stored weight. Implementations with per-edge weights
    /// override this.
    fn weighted_neighbors_into(&self, u: VertexId, out: &mut Vec<(VertexId, f64)>) {
        out.clear();
        let weighted = self.is_weighted();
        for v in self.neighbors(u) {
            let w = if weighted { self.weight(u, v) } else { 1.0 };
            out.push((v, w));
        }
    }

    /// Neighbors of `u` in a freshly allocated buffer
    fn neighbors(&self, u: VertexId) -> Vec<VertexId> {
        let mut out = Vec::new();
        self.neighbors_into(u, &mut out);
        out
    }

    /// Out-degree of `u`
    fn degree(&self, u: VertexId) -> usize {
        self.neighbors(u).len()
    }

    /// Number of edges; undirected edges stored in both directions count once
    fn edge_count(&self) -> usize {
        let mut buf = Vec::new();
        let mut sum = 0;
        for u in 0..self.vertex_count() {
            self.neighbors_into(u, &mut buf);
            sum += buf.len();
        }
        if self.is_directed() {
            sum
        } else {
            sum / 2
        }
    }
}

impl<G: Graph + ?Sized> Graph for &G {
    fn vertex_count(&self) -> usize {
        (**self).vertex_count()
    }

    fn is_directed(&self) -> bool {
        (**self).is_directed()
    }

    fn is_weighted(&self) -> bool {
        (**self).is_weighted()
    }

    fn original_to_internal_id(&self) -> Option<&HashMap<u64, VertexId>> {
        (**self).original_to_internal_id()
    }

    fn neighbors_into(&self, u: VertexId, out: &mut Vec<VertexId>) {
        (**self).neighbors_into(u, out)
    }

    fn weight(&self, u: VertexId, v: VertexId) -> f64 {
        (**self).weight(u, v)
    }

    fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        (**self).has_edge(u, v)
    }

    fn weighted_neighbors_into(&self, u: VertexId, out: &mut Vec<(VertexId, f64)>) {
        (**self).weighted_neighbors_into(u, out)
    }

    fn degree(&self, u: VertexId) -> usize {
        (**self).degree(u)
    }

    fn edge_count(&self) -> usize {
        (**self).edge_count()
    }
}
