//! Experiment harness
//!
//! Turns a validated [`ExperimentFile`](crate::config::ExperimentFile) into a
//! graph, an optional heuristic and a stream of trial results.

pub mod csv_writer;
pub mod runner;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::config::{ExperimentSection, GraphKind, GraphSection};
use crate::error::{PathlabError, Result};
use crate::graph::{
    CsrGraph, EmbeddingCosineHeuristic, Graph, GridGraph, Heuristic, ManhattanHeuristic,
    VertexId, ZeroHeuristic,
};
use crate::{bail_invalid, bail_unsupported, io};

pub use csv_writer::CsvRunWriter;
pub use runner::{ExperimentRunner, RunResult, RunRow, RunSettings};

/// A graph built from configuration
#[derive(Debug, Clone)]
pub enum LoadedGraph {
    Grid(GridGraph),
    Csr(CsrGraph),
}

impl LoadedGraph {
    pub fn as_grid(&self) -> Option<&GridGraph> {
        match self {
            LoadedGraph::Grid(grid) => Some(grid),
            LoadedGraph::Csr(_) => None,
        }
    }

    fn inner(&self) -> &dyn Graph {
        match self {
            LoadedGraph::Grid(grid) => grid,
            LoadedGraph::Csr(csr) => csr,
        }
    }
}

impl Graph for LoadedGraph {
    fn vertex_count(&self) -> usize {
        self.inner().vertex_count()
    }

    fn is_directed(&self) -> bool {
        self.inner().is_directed()
    }

    fn is_weighted(&self) -> bool {
        self.inner().is_weighted()
    }

    fn original_to_internal_id(&self) -> Option<&HashMap<u64, VertexId>> {
        self.inner().original_to_internal_id()
    }

    fn neighbors_into(&self, u: VertexId, out: &mut Vec<VertexId>) {
        self.inner().neighbors_into(u, out)
    }

    fn weighted_neighbors_into(&self, u: VertexId, out: &mut Vec<(VertexId, f64)>) {
        self.inner().weighted_neighbors_into(u, out)
    }

    fn weight(&self, u: VertexId, v: VertexId) -> f64 {
        self.inner().weight(u, v)
    }

    fn has_edge(&self, u: VertexId, v: VertexId) -> bool {
        self.inner().has_edge(u, v)
    }

    fn degree(&self, u: VertexId) -> usize {
        self.inner().degree(u)
    }

    fn edge_count(&self) -> usize {
        self.inner().edge_count()
    }
}

/// Build or load the graph a configuration describes
pub fn build_graph(section: &GraphSection) -> Result<LoadedGraph> {
    match section.kind {
        GraphKind::Grid => {
            if section.width == 0 || section.height == 0 {
                bail_invalid!(
                    "grid dimensions",
                    format!("{}x{}", section.width, section.height)
                );
            }
            let blocked = section.blocked.iter().map(|&[x, y]| (x, y));
            let grid = GridGraph::new(section.width, section.height, blocked);
            tracing::info!(
                width = section.width,
                height = section.height,
                blocked = grid.blocked_count(),
                "built grid"
            );
            Ok(LoadedGraph::Grid(grid))
        }
        GraphKind::Snap | GraphKind::EdgeList => {
            let Some(path) = section.path.as_deref() else {
                bail_invalid!("graph.path", format!("required for {} graphs", section.kind));
            };
            let csr = if section.kind == GraphKind::Snap {
                io::load_snap(path)?
            } else {
                io::load_edge_list(path, section.directed, section.weighted)?
            };
            Ok(LoadedGraph::Csr(csr))
        }
    }
}

/// Heuristic selector from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicKind {
    /// No heuristic; A* falls back to zero
    None,
    Zero,
    Manhattan,
    EmbeddingCosine,
}

impl HeuristicKind {
    pub const SUPPORTED: &'static str = "none, zero, manhattan, embedding_cosine";

    pub fn as_str(&self) -> &'static str {
        match self {
            HeuristicKind::None => "none",
            HeuristicKind::Zero => "zero",
            HeuristicKind::Manhattan => "manhattan",
            HeuristicKind::EmbeddingCosine => "embedding_cosine",
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = PathlabError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "none" => Ok(HeuristicKind::None),
            "zero" => Ok(HeuristicKind::Zero),
            "manhattan" => Ok(HeuristicKind::Manhattan),
            "embedding_cosine" | "embedded_cosine" => Ok(HeuristicKind::EmbeddingCosine),
            _ => Err(PathlabError::unsupported(
                "heuristic",
                s,
                HeuristicKind::SUPPORTED,
            )),
        }
    }
}

impl fmt::Display for HeuristicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Load the embeddings an experiment needs, if its heuristic uses them
pub fn load_experiment_embeddings(
    section: &ExperimentSection,
    kind: HeuristicKind,
    graph: &dyn Graph,
) -> Result<Option<Vec<Vec<f32>>>> {
    if kind != HeuristicKind::EmbeddingCosine {
        return Ok(None);
    }
    let Some(path) = section.embedding_path.as_deref() else {
        bail_invalid!(
            "experiment.embedding_path",
            "required for the embedding_cosine heuristic"
        );
    };
    io::load_embeddings(
        path,
        graph.original_to_internal_id(),
        graph.vertex_count(),
        section.embedding_dim,
    )
    .map(Some)
}

/// Construct the heuristic for `kind` over `graph`.
///
/// `manhattan` needs a grid; `embedding_cosine` needs one embedding per
/// vertex.
pub fn build_heuristic<'g>(
    kind: HeuristicKind,
    graph: &'g LoadedGraph,
    embeddings: Option<Vec<Vec<f32>>>,
) -> Result<Option<Box<dyn Heuristic + 'g>>> {
    match kind {
        HeuristicKind::None => Ok(None),
        HeuristicKind::Zero => Ok(Some(Box::new(ZeroHeuristic))),
        HeuristicKind::Manhattan => match graph.as_grid() {
            Some(grid) => Ok(Some(Box::new(ManhattanHeuristic::new(grid)))),
            None => bail_unsupported!(
                "heuristic for non-grid graphs",
                kind,
                "none, zero, embedding_cosine"
            ),
        },
        HeuristicKind::EmbeddingCosine => {
            let Some(embeddings) = embeddings else {
                bail_invalid!("embeddings", "required for the embedding_cosine heuristic");
            };
            if embeddings.len() != graph.vertex_count() {
                bail_invalid!(
                    "embeddings",
                    format!(
                        "{} vectors for {} vertices",
                        embeddings.len(),
                        graph.vertex_count()
                    )
                );
            }
            Ok(Some(Box::new(EmbeddingCosineHeuristic::new(embeddings))))
        }
    }
}
