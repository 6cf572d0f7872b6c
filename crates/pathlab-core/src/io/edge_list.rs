use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use crate::error::{PathlabError, Result};
use crate::graph::{CsrGraph, Graph, VertexId};
use crate::io::{open_dataset, records};
use crate::trace_time;

/// Load an edge list into a CSR graph.
///
/// Each data line is `u v` or, when `weighted`, `u v w`; further columns are
/// ignored. Original ids are assigned dense ids in first-seen order and the
/// mapping is kept on the graph. Undirected edges are stored both ways.
pub fn load_edge_list(path: &Path, directed: bool, weighted: bool) -> Result<CsrGraph> {
    let start = Instant::now();
    let reader = open_dataset(path, "dataset")?;

    let mut id_map: HashMap<u64, VertexId> = HashMap::new();
    let mut edges: Vec<(VertexId, VertexId, f64)> = Vec::new();

    for record in records(reader, path) {
        let (line, fields) = record?;
        if fields.len() < 2 {
            return Err(PathlabError::dataset_parse(
                path,
                line,
                format!("expected at least 2 columns, found {}", fields.len()),
            ));
        }

        let u = parse_vertex(&fields[0], path, line)?;
        let v = parse_vertex(&fields[1], path, line)?;
        let w = if weighted {
            let Some(raw) = fields.get(2) else {
                return Err(PathlabError::dataset_parse(path, line, "missing weight column"));
            };
            parse_weight(raw, path, line)?
        } else {
            1.0
        };

        let next = id_map.len();
        let u = *id_map.entry(u).or_insert(next);
        let next = id_map.len();
        let v = *id_map.entry(v).or_insert(next);
        edges.push((u, v, w));
    }

    let vertex_count = id_map.len();
    let graph = CsrGraph::from_triples(vertex_count, &edges, weighted, directed, Some(id_map))?;

    tracing::info!(
        path = %path.display(),
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        directed,
        weighted,
        "loaded edge list"
    );
    trace_time!(start, "load_edge_list");
    Ok(graph)
}

/// Load a SNAP "combined" dataset: an undirected, unweighted edge list.
pub fn load_snap(path: &Path) -> Result<CsrGraph> {
    load_edge_list(path, false, false)
}

fn parse_vertex(raw: &str, path: &Path, line: usize) -> Result<u64> {
    raw.parse()
        .map_err(|_| PathlabError::dataset_parse(path, line, format!("invalid vertex id {raw:?}")))
}

fn parse_weight(raw: &str, path: &Path, line: usize) -> Result<f64> {
    match raw.parse::<f64>() {
        Ok(w) if w.is_finite() && w >= 0.0 => Ok(w),
        Ok(w) => Err(PathlabError::dataset_parse(
            path,
            line,
            format!("weight {w} must be finite and non-negative"),
        )),
        Err(_) => Err(PathlabError::dataset_parse(
            path,
            line,
            format!("invalid weight {raw:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn dataset(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("edges.txt");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_snap_ids_assigned_first_seen() {
        let (_dir, path) = dataset("# FromNodeId ToNodeId\n100 7\n7 42\n\n100 42\n");
        let g = load_snap(&path).unwrap();

        assert_eq!(g.vertex_count(), 3);
        assert!(!g.is_directed());
        assert!(!g.is_weighted());
        assert_eq!(g.edge_count(), 3);

        let map = g.original_to_internal_id().unwrap();
        assert_eq!(map[&100], 0);
        assert_eq!(map[&7], 1);
        assert_eq!(map[&42], 2);

        // stored both ways
        assert!(g.has_edge(0, 1) && g.has_edge(1, 0));
        assert!(g.has_edge(1, 2) && g.has_edge(2, 1));
        assert_eq!(g.neighbors(0), vec![1, 2]);
    }

    #[test]
    fn test_directed_weighted_edge_list() {
        let (_dir, path) = dataset("1,2,0.5\n2\t3\t2.0\n1 3 4 extra\n");
        let g = load_edge_list(&path, true, true).unwrap();

        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.weight(0, 1), 0.5);
        assert_eq!(g.weight(1, 2), 2.0);
        assert_eq!(g.weight(0, 2), 4.0);
        assert!(!g.has_edge(1, 0));
    }

    #[test]
    fn test_self_loop_and_duplicates_kept() {
        let (_dir, path) = dataset("5 5\n5 6\n5 6\n");
        let g = load_edge_list(&path, true, false).unwrap();
        assert_eq!(g.neighbors(0), vec![0, 1, 1]);
    }

    #[test]
    fn test_empty_dataset_gives_empty_graph() {
        let (_dir, path) = dataset("# nothing here\n");
        let g = load_snap(&path).unwrap();
        assert_eq!(g.vertex_count(), 0);
    }

    #[test]
    fn test_malformed_id_reports_line() {
        let (_dir, path) = dataset("1 2\n# ok\n3 x\n");
        let err = load_snap(&path).unwrap_err();
        match err {
            PathlabError::DatasetParse { line, ref reason, .. } => {
                assert_eq!(line, 3);
                assert!(reason.contains("\"x\""));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_single_column_rejected() {
        let (_dir, path) = dataset("1\n");
        let err = load_snap(&path).unwrap_err();
        assert!(err.to_string().contains("expected at least 2 columns"));
    }

    #[test]
    fn test_missing_or_negative_weight_rejected() {
        let (_dir, path) = dataset("1 2\n");
        let err = load_edge_list(&path, false, true).unwrap_err();
        assert!(err.to_string().contains("missing weight"));

        let (_dir, path) = dataset("1 2 -3\n");
        let err = load_edge_list(&path, false, true).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = load_snap(&dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, PathlabError::NotFound { .. }));
    }
}
