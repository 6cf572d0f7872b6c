//! Compressed sparse row graph
//!
//! Row `u` occupies `neighbors[row_offsets[u]..row_offsets[u + 1]]`, with an
//! optional `weights` array parallel to `neighbors`.

use std::collections::HashMap;

use crate::bail_graph;
use crate::error::Result;
use crate::graph::traversal::Graph;
use crate::graph::types::VertexId;

#[derive(Debug, Clone)]
pub struct CsrGraph {
    vertex_count: usize,
    row_offsets: Vec<usize>,
    neighbors: Vec<VertexId>,
    weights: Option<Vec<f64>>,
    directed: bool,
    id_map: Option<HashMap<u64, VertexId>>,
}

impl CsrGraph {
    /// Build a graph from raw CSR arrays, validating their shape.
    ///
    /// Rejects offsets of the wrong length or out of order, neighbor ids
    /// outside `0..vertex_count`, weight arrays of the wrong length, and
    /// negative or non-finite weights.
    pub fn new(
        vertex_count: usize,
        row_offsets: Vec<usize>,
        neighbors: Vec<VertexId>,
        weights: Option<Vec<f64>>,
        directed: bool,
        id_map: Option<HashMap<u64, VertexId>>,
    ) -> Result<Self> {
        if row_offsets.len() != vertex_count + 1 {
            bail_graph!(
                "row_offsets has {} entries, expected {}",
                row_offsets.len(),
                vertex_count + 1
            );
        }
        if row_offsets[0] != 0 {
            bail_graph!("row_offsets must start at 0, got {}", row_offsets[0]);
        }
        if let Some(u) = row_offsets.windows(2).position(|w| w[0] > w[1]) {
            bail_graph!("row_offsets decrease at vertex {}", u);
        }
        if row_offsets[vertex_count] != neighbors.len() {
            bail_graph!(
                "row_offsets end at {} but there are {} neighbor entries",
                row_offsets[vertex_count],
                neighbors.len()
            );
        }
        if let Some(&v) = neighbors.iter().find(|&&v| v >= vertex_count) {
            bail_graph!("neighbor id {} out of range 0..{}", v, vertex_count);
        }
        if let Some(w) = &weights {
            if w.len() != neighbors.len() {
                bail_graph!(
                    "weights has {} entries, expected {}",
                    w.len(),
                    neighbors.len()
                );
            }
            if let Some(bad) = w.iter().find(|x| !x.is_finite() || **x < 0.0) {
                bail_graph!("edge weights must be finite and non-negative, got {}", bad);
            }
        }
        if let Some(map) = &id_map {
            if let Some((orig, id)) = map.iter().find(|(_, id)| **id >= vertex_count) {
                bail_graph!(
                    "id map sends {} to {}, out of range 0..{}",
                    orig,
                    id,
                    vertex_count
                );
            }
        }

        Ok(CsrGraph {
            vertex_count,
            row_offsets,
            neighbors,
            weights,
            directed,
            id_map,
        })
    }

    /// Build an unweighted graph from an edge list.
    ///
    /// Undirected edges are stored in both directions. Within a row,
    /// neighbors keep the order in which the edges were given.
    pub fn from_edges(
        vertex_count: usize,
        edges: &[(VertexId, VertexId)],
        directed: bool,
    ) -> Result<Self> {
        let triples: Vec<(VertexId, VertexId, f64)> =
            edges.iter().map(|&(u, v)| (u, v, 1.0)).collect();
        Self::from_triples(vertex_count, &triples, false, directed, None)
    }

    /// Build a weighted graph from `(u, v, weight)` triples.
    pub fn from_weighted_edges(
        vertex_count: usize,
        edges: &[(VertexId, VertexId, f64)],
        directed: bool,
    ) -> Result<Self> {
        Self::from_triples(vertex_count, edges, true, directed, None)
    }

    pub(crate) fn from_triples(
        vertex_count: usize,
        edges: &[(VertexId, VertexId, f64)],
        weighted: bool,
        directed: bool,
        id_map: Option<HashMap<u64, VertexId>>,
    ) -> Result<Self> {
        if let Some(&(u, v, _)) = edges
            .iter()
            .find(|(u, v, _)| *u >= vertex_count || *v >= vertex_count)
        {
            bail_graph!("edge ({}, {}) out of range 0..{}", u, v, vertex_count);
        }

        let mut degree = vec![0usize; vertex_count];
        for &(u, v, _) in edges {
            degree[u] += 1;
            if !directed {
                degree[v] += 1;
            }
        }

        let mut row_offsets = Vec::with_capacity(vertex_count + 1);
        let mut total = 0;
        row_offsets.push(0);
        for d in &degree {
            total += d;
            row_offsets.push(total);
        }

        let mut cursor: Vec<usize> = row_offsets[..vertex_count].to_vec();
        let mut neighbors = vec![0; total];
        let mut weights = vec![0.0; total];
        let mut place = |from: VertexId, to: VertexId, w: f64| {
            neighbors[cursor[from]] = to;
            weights[cursor[from]] = w;
            cursor[from] += 1;
        };
        for &(u, v, w) in edges {
            place(u, v, w);
            if !directed {
                place(v, u, w);
            }
        }

        let weights = if weighted { Some(weights) } else { None };
        Self::new(
            vertex_count,
            row_offsets,
            neighbors,
            weights,
            directed,
            id_map,
        )
    }

    /// Zero-copy view of `u`'s neighbor row
    pub fn neighbor_slice(&self, u: VertexId) -> &[VertexId] {
        &self.neighbors[self.row(u)]
    }

    fn row(&self, u: VertexId) -> std::ops::Range<usize> {
        self.row_offsets[u]..self.row_offsets[u + 1]
    }
}

impl Graph for CsrGraph {
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn is_directed(&self) -> bool {
        self.directed
    }

    fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    fn original_to_internal_id(&self) -> Option<&HashMap<u64, VertexId>> {
        self.id_map.as_ref()
    }

    fn neighbors_into(&self, u: VertexId, out: &mut Vec<VertexId>) {
        out.clear();
        out.extend_from_slice(self.neighbor_slice(u));
    }

    fn weighted_neighbors_into(&self, u: VertexId, out: &mut Vec<(VertexId, f64)>) {
        out.clear();
        let row = self.row(u);
        match &self.weights {
            Some(w) => out.extend(
                self.neighbors[row.clone()]
                    .iter()
                    .copied()
                    .zip(w[row].iter().copied()),
            ),
            None => out.extend(self.neighbors[row].iter().map(|&v| (v, 1.0))),
        }
    }

    /// Linear scan of `u`'s row, O(degree). The first matching entry wins
    /// when duplicate edges are present.
    fn weight(&self, u: VertexId, v: VertexId) -> f64 {
        for i in self.row(u) {
            if self.neighbors[i] == v {
                return match &self.weights {
                    Some(w) => w[i],
                    None => 1.0,
                };
            }
        }
        f64::INFINITY
    }

    fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.neighbor_slice(u).contains(&v)
    }

    fn degree(&self, u: VertexId) -> usize {
        self.row_offsets[u + 1] - self.row_offsets[u]
    }

    fn edge_count(&self) -> usize {
        if self.directed {
            self.neighbors.len()
        } else {
            self.neighbors.len() / 2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> CsrGraph {
        // 0 -> 1 (2.0), 0 -> 2 (5.0), 1 -> 2 (1.5)
        CsrGraph::new(
            3,
            vec![0, 2, 3, 3],
            vec![1, 2, 2],
            Some(vec![2.0, 5.0, 1.5]),
            true,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_neighbors_follow_row_order() {
        let g = triangle();
        assert_eq!(g.neighbors(0), vec![1, 2]);
        assert_eq!(g.neighbors(1), vec![2]);
        assert!(g.neighbors(2).is_empty());
        assert_eq!(g.degree(0), 2);
    }

    #[test]
    fn test_neighbors_into_clears_buffer() {
        let g = triangle();
        let mut buf = vec![9, 9, 9, 9];
        g.neighbors_into(1, &mut buf);
        assert_eq!(buf, vec![2]);
    }

    #[test]
    fn test_weight_lookup() {
        let g = triangle();
        assert!(g.is_weighted());
        assert_eq!(g.weight(0, 1), 2.0);
        assert_eq!(g.weight(0, 2), 5.0);
        assert_eq!(g.weight(1, 2), 1.5);
        assert!(g.weight(2, 0).is_infinite());
        assert!(g.weight(1, 0).is_infinite());
    }

    #[test]
    fn test_unweighted_weight_is_one() {
        let g = CsrGraph::from_edges(3, &[(0, 1), (1, 2)], true).unwrap();
        assert!(!g.is_weighted());
        assert_eq!(g.weight(0, 1), 1.0);
        assert!(g.weight(0, 2).is_infinite());
    }

    #[test]
    fn test_has_edge() {
        let g = triangle();
        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(1, 0));
    }

    #[test]
    fn test_undirected_edges_stored_both_ways() {
        let g = CsrGraph::from_edges(3, &[(0, 1), (1, 2)], false).unwrap();
        assert!(!g.is_directed());
        assert_eq!(g.neighbors(1), vec![0, 2]);
        assert!(g.has_edge(2, 1));
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn test_duplicate_edges_kept() {
        let g = CsrGraph::from_weighted_edges(2, &[(0, 1, 3.0), (0, 1, 1.0)], true).unwrap();
        assert_eq!(g.neighbors(0), vec![1, 1]);
        assert_eq!(g.weight(0, 1), 3.0);
        assert_eq!(g.edge_count(), 2);

        let mut edges = Vec::new();
        g.weighted_neighbors_into(0, &mut edges);
        assert_eq!(edges, vec![(1, 3.0), (1, 1.0)]);
    }

    #[test]
    fn test_empty_graph() {
        let g = CsrGraph::new(0, vec![0], vec![], None, true, None).unwrap();
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_rejects_bad_offsets_length() {
        let err = CsrGraph::new(2, vec![0, 1], vec![1], None, true, None).unwrap_err();
        assert!(err.to_string().contains("row_offsets"));
    }

    #[test]
    fn test_rejects_decreasing_offsets() {
        assert!(CsrGraph::new(2, vec![0, 2, 1], vec![1, 0], None, true, None).is_err());
    }

    #[test]
    fn test_rejects_neighbor_out_of_range() {
        let err = CsrGraph::new(2, vec![0, 1, 1], vec![5], None, true, None).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_rejects_negative_weight() {
        assert!(CsrGraph::from_weighted_edges(2, &[(0, 1, -1.0)], true).is_err());
    }

    #[test]
    fn test_rejects_weight_length_mismatch() {
        assert!(CsrGraph::new(2, vec![0, 1, 1], vec![1], Some(vec![]), true, None).is_err());
    }

    #[test]
    fn test_id_map_exposed() {
        let mut map = HashMap::new();
        map.insert(1000, 0);
        map.insert(42, 1);
        let g = CsrGraph::new(2, vec![0, 1, 1], vec![1], None, true, Some(map)).unwrap();
        let map = g.original_to_internal_id().unwrap();
        assert_eq!(map.get(&42), Some(&1));
    }
}
