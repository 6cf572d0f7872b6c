use std::fmt;

use serde::Serialize;

use crate::graph::types::VertexId;

/// Observer for search events.
///
/// Sinks are optional and purely observational: a search produces the same
/// path with or without one. A sink is not shared between searches that run
/// at the same time.
pub trait MetricsSink {
    fn on_node_expanded(&mut self, vertex: VertexId);

    fn on_edge_relaxed(&mut self, from: VertexId, to: VertexId, old_cost: f64, new_cost: f64);

    fn on_frontier_size(&mut self, size: usize);

    /// Called exactly once when a search finishes, found or not
    fn on_finish(&mut self, runtime_ms: f64, path_cost: f64, path_len: usize);
}

/// Aggregated counters for a single run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunMetrics {
    pub nodes_expanded: u64,
    pub edges_relaxed: u64,
    pub max_frontier: usize,
    pub runtime_ms: f64,
    pub path_cost: f64,
    pub path_len: usize,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsSink for RunMetrics {
    fn on_node_expanded(&mut self, _vertex: VertexId) {
        self.nodes_expanded += 1;
    }

    fn on_edge_relaxed(&mut self, _from: VertexId, _to: VertexId, _old: f64, _new: f64) {
        self.edges_relaxed += 1;
    }

    fn on_frontier_size(&mut self, size: usize) {
        self.max_frontier = self.max_frontier.max(size);
    }

    fn on_finish(&mut self, runtime_ms: f64, path_cost: f64, path_len: usize) {
        self.runtime_ms = runtime_ms;
        self.path_cost = path_cost;
        self.path_len = path_len;
    }
}

impl fmt::Display for RunMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "nodes_expanded: {}, edges_relaxed: {}, max_frontier: {}, runtime_ms: {:.3}, path_cost: {}, path_len: {}",
            self.nodes_expanded,
            self.edges_relaxed,
            self.max_frontier,
            self.runtime_ms,
            self.path_cost,
            self.path_len
        )
    }
}
