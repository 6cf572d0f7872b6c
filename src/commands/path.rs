//! `pathlab path` - a single shortest-path query

use std::collections::HashMap;

use serde::Serialize;

use crate::cli::{Cli, OutputFormat, PathArgs};
use pathlab_core::bail_usage;
use pathlab_core::error::{PathlabError, Result};
use pathlab_core::experiment::{build_heuristic, HeuristicKind, LoadedGraph};
use pathlab_core::graph::{Graph, GridGraph, Path, RunMetrics, ShortestPath, VertexId};
use pathlab_core::io::{load_edge_list, load_embeddings};

#[derive(Debug, Serialize)]
struct PathReport {
    algorithm: &'static str,
    heuristic: &'static str,
    source: u64,
    destination: u64,
    found: bool,
    /// Vertices in the ids the user passed: cell ids or dataset ids
    path: Vec<u64>,
    cost: Option<f64>,
    metrics: RunMetrics,
}

pub fn execute(cli: &Cli, args: &PathArgs) -> Result<()> {
    let graph = load_graph(args)?;

    let internal_ids = graph.original_to_internal_id();
    let source = resolve_vertex(&graph, internal_ids, args.from, "--from")?;
    let destination = resolve_vertex(&graph, internal_ids, args.to, "--to")?;

    let embeddings = if args.heuristic == HeuristicKind::EmbeddingCosine {
        let Some(path) = args.embeddings.as_deref() else {
            bail_usage!("--embeddings is required for the embedding_cosine heuristic");
        };
        Some(load_embeddings(
            path,
            internal_ids,
            graph.vertex_count(),
            args.embedding_dim,
        )?)
    } else {
        None
    };
    let heuristic = build_heuristic(args.heuristic, &graph, embeddings)?;

    let mut metrics = RunMetrics::new();
    let path = args.algorithm.compute(
        &graph,
        source,
        destination,
        Some(&mut metrics),
        heuristic.as_deref(),
    );

    let report = PathReport {
        algorithm: args.algorithm.name(),
        heuristic: heuristic.as_deref().map_or("none", |h| h.name()),
        source: args.from,
        destination: args.to,
        found: path.found(),
        path: external_ids(&path, internal_ids),
        cost: path.found().then_some(path.total_cost),
        metrics,
    };

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Human => print_human(cli, &report),
    }
    Ok(())
}

fn load_graph(args: &PathArgs) -> Result<LoadedGraph> {
    if let Some(edges) = args.edges.as_deref() {
        return Ok(LoadedGraph::Csr(load_edge_list(
            edges,
            args.directed,
            args.weighted,
        )?));
    }

    match (args.width, args.height) {
        (Some(width), Some(height)) if width > 0 && height > 0 => Ok(LoadedGraph::Grid(
            GridGraph::new(width, height, args.blocked.iter().copied()),
        )),
        (Some(width), Some(height)) => Err(PathlabError::invalid_value(
            "grid dimensions",
            format!("{width}x{height} (both must be positive)"),
        )),
        _ => bail_usage!("either --width and --height or --edges is required"),
    }
}

/// Map a user-facing id to a dense vertex id, rejecting unknown ids
fn resolve_vertex(
    graph: &dyn Graph,
    internal_ids: Option<&HashMap<u64, VertexId>>,
    id: u64,
    flag: &str,
) -> Result<VertexId> {
    let resolved = match internal_ids {
        Some(map) => map.get(&id).copied(),
        None => usize::try_from(id)
            .ok()
            .filter(|&v| v < graph.vertex_count()),
    };
    resolved.ok_or_else(|| {
        PathlabError::UsageError(format!(
            "{flag} {id} is not a vertex of this graph ({} vertices)",
            graph.vertex_count()
        ))
    })
}

fn external_ids(path: &Path, internal_ids: Option<&HashMap<u64, VertexId>>) -> Vec<u64> {
    match internal_ids {
        Some(map) => {
            let mut original = vec![0u64; map.len()];
            for (&external, &internal) in map {
                original[internal] = external;
            }
            path.vertices.iter().map(|&v| original[v]).collect()
        }
        None => path.vertices.iter().map(|&v| v as u64).collect(),
    }
}

fn print_human(cli: &Cli, report: &PathReport) {
    if report.found {
        let hops: Vec<String> = report.path.iter().map(u64::to_string).collect();
        println!("{}", hops.join(" -> "));
        if let Some(cost) = report.cost {
            println!("cost: {cost}");
        }
    } else {
        println!("no path from {} to {}", report.source, report.destination);
    }

    if !cli.quiet {
        println!("algorithm: {}", report.algorithm);
        println!("heuristic: {}", report.heuristic);
        println!("{}", report.metrics);
    }
}
