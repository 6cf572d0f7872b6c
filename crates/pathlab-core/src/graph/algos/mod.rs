//! Shortest-path algorithm implementations
//!
//! - `bfs`: unweighted shortest path by hop count
//! - `dijkstra`: non-negative weighted shortest path
//! - `astar`: heuristic-guided weighted shortest path
//! - `shared`: frontiers, metrics forwarding and path reconstruction

pub mod astar;
pub mod bfs;
pub mod dijkstra;
pub mod shared;

use std::fmt;
use std::str::FromStr;

use crate::error::PathlabError;
use crate::graph::heuristic::Heuristic;
use crate::graph::metrics::MetricsSink;
use crate::graph::traversal::Graph;
use crate::graph::types::{Path, VertexId};

pub use astar::AStar;
pub use bfs::Bfs;
pub use dijkstra::Dijkstra;
pub use shared::reconstruct_path;

/// A single-pair shortest-path search.
///
/// `source` and `destination` must be valid vertex ids of `graph`; an
/// out-of-range id panics. An unreachable destination yields
/// [`Path::not_found`]. When a sink is given it receives every event of the
/// run, ending with exactly one `on_finish`.
pub trait ShortestPath {
    fn name(&self) -> &'static str;

    fn compute(
        &self,
        graph: &dyn Graph,
        source: VertexId,
        destination: VertexId,
        metrics: Option<&mut dyn MetricsSink>,
        heuristic: Option<&dyn Heuristic>,
    ) -> Path;
}

/// Algorithm selector used by configuration and the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Bfs,
    Dijkstra,
    AStar,
}

impl Algorithm {
    pub const SUPPORTED: &'static str = "BFS, Dijkstra, AStar";

    /// Whether the algorithm consults a heuristic
    pub fn uses_heuristic(&self) -> bool {
        matches!(self, Algorithm::AStar)
    }
}

impl ShortestPath for Algorithm {
    fn name(&self) -> &'static str {
        match self {
            Algorithm::Bfs => Bfs.name(),
            Algorithm::Dijkstra => Dijkstra.name(),
            Algorithm::AStar => AStar.name(),
        }
    }

    fn compute(
        &self,
        graph: &dyn Graph,
        source: VertexId,
        destination: VertexId,
        metrics: Option<&mut dyn MetricsSink>,
        heuristic: Option<&dyn Heuristic>,
    ) -> Path {
        match self {
            Algorithm::Bfs => Bfs.compute(graph, source, destination, metrics, heuristic),
            Algorithm::Dijkstra => Dijkstra.compute(graph, source, destination, metrics, heuristic),
            Algorithm::AStar => AStar.compute(graph, source, destination, metrics, heuristic),
        }
    }
}

impl FromStr for Algorithm {
    type Err = PathlabError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dijkstra" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" | "a_star" => Ok(Algorithm::AStar),
            _ => Err(PathlabError::unsupported(
                "algorithm",
                s,
                Algorithm::SUPPORTED,
            )),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
