//! Repeated single-pair searches over one graph

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::config::ExperimentFile;
use crate::error::{PathlabError, Result};
use crate::graph::{Algorithm, Graph, Heuristic, Path, RunMetrics, ShortestPath, VertexId};

/// Per-experiment settings copied into every result
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub graph_name: String,
    pub graph_type: String,
    pub trials: usize,
    pub seed: u64,
    pub source: Option<VertexId>,
    pub destination: Option<VertexId>,
}

impl RunSettings {
    pub fn from_config(config: &ExperimentFile) -> Self {
        let experiment = &config.experiment;
        RunSettings {
            graph_name: experiment.graph_name.clone(),
            graph_type: experiment.graph_type.clone(),
            trials: experiment.trials,
            seed: experiment.seed,
            source: experiment.source,
            destination: experiment.destination,
        }
    }
}

/// Outcome of one trial
#[derive(Debug, Clone)]
pub struct RunResult {
    pub run_id: usize,
    pub timestamp: DateTime<Utc>,
    pub algorithm: &'static str,
    pub heuristic: &'static str,
    pub graph_name: String,
    pub graph_type: String,
    pub directed: bool,
    pub weighted: bool,
    pub num_vertices: usize,
    pub num_edges: usize,
    pub source: VertexId,
    pub target: VertexId,
    pub path: Path,
    pub metrics: RunMetrics,
}

/// Flat, serializable form of a [`RunResult`]; one CSV line.
///
/// `path_cost` is NaN and `path_length` 0 when no path was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRow {
    pub run_id: usize,
    pub timestamp: String,
    pub algorithm: String,
    pub heuristic: String,
    pub graph_name: String,
    pub graph_type: String,
    pub directed: bool,
    pub weighted: bool,
    pub num_vertices: usize,
    pub num_edges: usize,
    pub source: VertexId,
    pub target: VertexId,
    pub path_found: bool,
    pub path_cost: f64,
    pub path_length: usize,
    pub nodes_expanded: u64,
    pub edges_relaxed: u64,
    pub max_frontier: usize,
    pub runtime_ms: f64,
}

impl From<&RunResult> for RunRow {
    fn from(r: &RunResult) -> Self {
        let found = r.path.found();
        RunRow {
            run_id: r.run_id,
            timestamp: r.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            algorithm: r.algorithm.to_string(),
            heuristic: r.heuristic.to_string(),
            graph_name: r.graph_name.clone(),
            graph_type: r.graph_type.clone(),
            directed: r.directed,
            weighted: r.weighted,
            num_vertices: r.num_vertices,
            num_edges: r.num_edges,
            source: r.source,
            target: r.target,
            path_found: found,
            path_cost: if found { r.path.total_cost } else { f64::NAN },
            path_length: if found { r.path.len() } else { 0 },
            nodes_expanded: r.metrics.nodes_expanded,
            edges_relaxed: r.metrics.edges_relaxed,
            max_frontier: r.metrics.max_frontier,
            runtime_ms: r.metrics.runtime_ms,
        }
    }
}

/// Runs `trials` searches with seeded random endpoints
pub struct ExperimentRunner<'a> {
    settings: RunSettings,
    graph: &'a dyn Graph,
    algorithm: Algorithm,
    heuristic: Option<&'a dyn Heuristic>,
    num_edges: usize,
}

impl<'a> ExperimentRunner<'a> {
    /// Fails on an empty graph or a fixed endpoint outside it
    pub fn new(
        settings: RunSettings,
        graph: &'a dyn Graph,
        algorithm: Algorithm,
        heuristic: Option<&'a dyn Heuristic>,
    ) -> Result<Self> {
        let n = graph.vertex_count();
        if n == 0 {
            return Err(PathlabError::invalid_graph(
                "graph has no vertices to search",
            ));
        }
        for (context, id) in [
            ("experiment.source", settings.source),
            ("experiment.destination", settings.destination),
        ] {
            if let Some(id) = id.filter(|&id| id >= n) {
                return Err(PathlabError::invalid_value(
                    context,
                    format!("vertex {id} out of range 0..{n}"),
                ));
            }
        }

        let num_edges = graph.edge_count();
        tracing::info!(
            graph = %settings.graph_name,
            vertices = n,
            edges = num_edges,
            %algorithm,
            heuristic = heuristic.map_or("none", |h| h.name()),
            trials = settings.trials,
            seed = settings.seed,
            "starting experiment"
        );

        Ok(ExperimentRunner {
            settings,
            graph,
            algorithm,
            heuristic,
            num_edges,
        })
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Lazily run every trial in order.
    ///
    /// The same seed always produces the same endpoint sequence.
    pub fn run_all(&self) -> impl Iterator<Item = RunResult> + '_ {
        let mut rng = fastrand::Rng::with_seed(self.settings.seed);
        (0..self.settings.trials).map(move |run_id| self.run_trial(run_id, &mut rng))
    }

    fn pick_endpoints(&self, rng: &mut fastrand::Rng) -> (VertexId, VertexId) {
        let n = self.graph.vertex_count();
        let source = self.settings.source.unwrap_or_else(|| rng.usize(..n));
        let mut destination = self.settings.destination.unwrap_or_else(|| rng.usize(..n));
        if self.settings.destination.is_none() && n > 1 {
            while destination == source {
                destination = rng.usize(..n);
            }
        }
        (source, destination)
    }

    fn run_trial(&self, run_id: usize, rng: &mut fastrand::Rng) -> RunResult {
        let (source, target) = self.pick_endpoints(rng);
        let mut metrics = RunMetrics::new();
        let path = self.algorithm.compute(
            self.graph,
            source,
            target,
            Some(&mut metrics),
            self.heuristic,
        );

        tracing::debug!(
            run_id,
            source,
            target,
            found = path.found(),
            cost = path.total_cost,
            expanded = metrics.nodes_expanded,
            "trial finished"
        );

        RunResult {
            run_id,
            timestamp: Utc::now(),
            algorithm: self.algorithm.name(),
            heuristic: self.heuristic.map_or("none", |h| h.name()),
            graph_name: self.settings.graph_name.clone(),
            graph_type: self.settings.graph_type.clone(),
            directed: self.graph.is_directed(),
            weighted: self.graph.is_weighted(),
            num_vertices: self.graph.vertex_count(),
            num_edges: self.num_edges,
            source,
            target,
            path,
            metrics,
        }
    }
}
