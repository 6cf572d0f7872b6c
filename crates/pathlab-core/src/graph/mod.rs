//! Graph representations and shortest-path search
//!
//! Provides the traversal engine used by experiments:
//! - `Graph` trait with CSR and grid implementations
//! - Heuristics for goal-directed search
//! - Metrics sinks that observe a search as it runs
//! - BFS, Dijkstra and A* over any `Graph`

pub mod algos;
pub mod csr;
pub mod grid;
pub mod heuristic;
pub mod metrics;
pub mod traversal;
pub mod types;

pub use algos::{Algorithm, AStar, Bfs, Dijkstra, ShortestPath};
pub use csr::CsrGraph;
pub use grid::GridGraph;
pub use heuristic::{EmbeddingCosineHeuristic, Heuristic, ManhattanHeuristic, ZeroHeuristic};
pub use metrics::{MetricsSink, RunMetrics};
pub use traversal::Graph;
pub use types::{Path, VertexId};
