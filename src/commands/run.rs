//! `pathlab run` - batch trials from an experiment config

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::cli::{Cli, OutputFormat};
use pathlab_core::config::ExperimentFile;
use pathlab_core::error::{PathlabError, Result};
use pathlab_core::experiment::{
    build_graph, build_heuristic, load_experiment_embeddings, CsvRunWriter, ExperimentRunner,
    RunResult, RunRow, RunSettings,
};
use pathlab_core::graph::Graph;

/// Command-line values that replace config entries
#[derive(Debug, Default)]
pub struct Overrides {
    pub trials: Option<usize>,
    pub seed: Option<u64>,
    pub runs_csv: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    graph_name: String,
    algorithm: String,
    heuristic: String,
    vertices: usize,
    edges: usize,
    trials: usize,
    found: usize,
    mean_cost: Option<f64>,
    mean_nodes_expanded: f64,
    total_runtime_ms: f64,
    runs_csv: PathBuf,
}

impl Summary {
    fn record(&mut self, result: &RunResult) {
        self.trials += 1;
        if result.path.found() {
            let previous = self.mean_cost.unwrap_or(0.0) * self.found as f64;
            self.found += 1;
            self.mean_cost = Some((previous + result.path.total_cost) / self.found as f64);
        }
        let n = self.trials as f64;
        self.mean_nodes_expanded +=
            (result.metrics.nodes_expanded as f64 - self.mean_nodes_expanded) / n;
        self.total_runtime_ms += result.metrics.runtime_ms;
    }
}

pub fn execute(cli: &Cli, config_path: &Path, overrides: Overrides) -> Result<()> {
    let start = Instant::now();

    let mut config = ExperimentFile::load(config_path)?;
    if let Some(trials) = overrides.trials {
        config.experiment.trials = trials;
    }
    if let Some(seed) = overrides.seed {
        config.experiment.seed = seed;
    }
    if let Some(runs_csv) = overrides.runs_csv {
        config.output.runs_csv = runs_csv;
    }
    config.validate()?;

    let algorithm = config.algorithm()?;
    let heuristic_kind = config.heuristic_kind()?;
    let graph = build_graph(&config.graph)?;
    let embeddings = load_experiment_embeddings(&config.experiment, heuristic_kind, &graph)?;
    let heuristic = build_heuristic(heuristic_kind, &graph, embeddings)?;
    tracing::debug!(elapsed = ?start.elapsed(), "experiment resources ready");

    let runner = ExperimentRunner::new(
        RunSettings::from_config(&config),
        &graph,
        algorithm,
        heuristic.as_deref(),
    )?;
    let mut writer = CsvRunWriter::open(&config.output.runs_csv)?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = Arc::clone(&interrupted);
    let _ = ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::SeqCst);
    });

    let mut summary = Summary {
        graph_name: config.experiment.graph_name.clone(),
        algorithm: algorithm.to_string(),
        heuristic: heuristic_kind.to_string(),
        vertices: graph.vertex_count(),
        edges: graph.edge_count(),
        runs_csv: writer.path().to_path_buf(),
        ..Default::default()
    };

    for result in runner.run_all() {
        writer.write(&RunRow::from(&result))?;
        summary.record(&result);

        if interrupted.load(Ordering::SeqCst) {
            tracing::warn!(
                completed = summary.trials,
                requested = config.experiment.trials,
                "interrupted; stopping after current trial"
            );
            return Err(PathlabError::Interrupted);
        }
    }

    tracing::info!(
        trials = summary.trials,
        found = summary.found,
        rows = writer.rows_written(),
        elapsed = ?start.elapsed(),
        "experiment completed"
    );

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Human => {
            if !cli.quiet {
                println!(
                    "Experiment completed: {} trials, {} found, results appended to {}",
                    summary.trials,
                    summary.found,
                    summary.runs_csv.display()
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlab_core::graph::{Algorithm, GridGraph, Path as SearchPath, RunMetrics};

    fn result(found: bool, cost: f64, expanded: u64) -> RunResult {
        let path = if found {
            SearchPath::new(vec![0, 1], cost)
        } else {
            SearchPath::not_found()
        };
        let metrics = RunMetrics {
            nodes_expanded: expanded,
            runtime_ms: 1.0,
            ..RunMetrics::default()
        };
        let grid = GridGraph::open(2, 1);
        let settings = RunSettings {
            graph_name: "g".to_string(),
            graph_type: "grid".to_string(),
            trials: 1,
            seed: 1,
            source: Some(0),
            destination: Some(1),
        };
        let runner = ExperimentRunner::new(settings, &grid, Algorithm::Bfs, None).unwrap();
        let mut r = runner.run_all().next().unwrap();
        r.path = path;
        r.metrics = metrics;
        r
    }

    #[test]
    fn test_summary_means() {
        let mut summary = Summary::default();
        summary.record(&result(true, 2.0, 4));
        summary.record(&result(false, 0.0, 10));
        summary.record(&result(true, 4.0, 7));

        assert_eq!(summary.trials, 3);
        assert_eq!(summary.found, 2);
        assert_eq!(summary.mean_cost, Some(3.0));
        assert!((summary.mean_nodes_expanded - 7.0).abs() < 1e-9);
        assert_eq!(summary.total_runtime_ms, 3.0);
    }

    #[test]
    fn test_summary_without_paths_has_no_mean_cost() {
        let mut summary = Summary::default();
        summary.record(&result(false, 0.0, 1));
        assert_eq!(summary.mean_cost, None);
    }
}
