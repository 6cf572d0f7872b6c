//! Experiment configuration for pathlab
//!
//! A configuration file holds `graph`, `experiment` and `output` sections.
//! JSON, TOML and YAML are accepted; the format follows the file extension.

pub mod types;

use std::fs;
use std::path::Path;

use crate::error::{PathlabError, Result};
use crate::experiment::HeuristicKind;
use crate::graph::Algorithm;
use crate::{bail_invalid, bail_unsupported};

pub use types::{ExperimentFile, ExperimentSection, GraphKind, GraphSection, OutputSection};

/// Extensions understood by [`ExperimentFile::load`]
pub const SUPPORTED_EXTENSIONS: &str = "json, toml, yaml, yml";

impl ExperimentFile {
    /// Load configuration from a file, choosing the parser by extension
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PathlabError::not_found("config file", path.display()));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let content = fs::read_to_string(path)
            .map_err(|e| PathlabError::io_operation("read", path.display(), e))?;

        let config: ExperimentFile = match extension.as_str() {
            "json" => serde_json::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            "yaml" | "yml" => serde_yaml::from_str(&content)?,
            _ => bail_unsupported!(
                "config format",
                path.display(),
                SUPPORTED_EXTENSIONS
            ),
        };

        tracing::debug!(path = %path.display(), format = %extension, "loaded config");
        Ok(config)
    }

    /// Check cross-field requirements that serde cannot express
    pub fn validate(&self) -> Result<()> {
        let graph = &self.graph;
        match graph.kind {
            GraphKind::Grid => {
                if graph.width == 0 || graph.height == 0 {
                    bail_invalid!(
                        "grid dimensions",
                        format!("{}x{} (both must be positive)", graph.width, graph.height)
                    );
                }
            }
            GraphKind::Snap | GraphKind::EdgeList => {
                if graph.path.is_none() {
                    bail_invalid!("graph.path", format!("required for {} graphs", graph.kind));
                }
            }
        }

        let experiment = &self.experiment;
        if experiment.trials == 0 {
            bail_invalid!("experiment.trials", "must be at least 1");
        }

        let algorithm = self.algorithm()?;
        let heuristic = self.heuristic_kind()?;

        if heuristic == HeuristicKind::EmbeddingCosine {
            if experiment.embedding_path.is_none() {
                bail_invalid!(
                    "experiment.embedding_path",
                    "required for the embedding_cosine heuristic"
                );
            }
            if experiment.embedding_dim == 0 {
                bail_invalid!(
                    "experiment.embedding_dim",
                    "must be positive for the embedding_cosine heuristic"
                );
            }
        }

        if heuristic != HeuristicKind::None && !algorithm.uses_heuristic() {
            tracing::warn!(
                %algorithm,
                heuristic = heuristic.as_str(),
                "heuristic is ignored by this algorithm"
            );
        }

        Ok(())
    }

    pub fn algorithm(&self) -> Result<Algorithm> {
        self.experiment.algorithm.parse()
    }

    /// Absent heuristic means `none`
    pub fn heuristic_kind(&self) -> Result<HeuristicKind> {
        match self.experiment.heuristic.as_deref() {
            Some(name) => name.parse(),
            None => Ok(HeuristicKind::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const GRID_JSON: &str = r#"{
        "graph": { "type": "grid", "width": 3, "height": 3, "blocked": [[1, 0], [1, 1]] },
        "experiment": {
            "graph_name": "grid3",
            "graph_type": "grid",
            "algorithm": "AStar",
            "heuristic": "manhattan",
            "trials": 5
        },
        "output": { "runs_csv": "out/runs.csv" }
    }"#;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "grid.json", GRID_JSON);

        let config = ExperimentFile::load(&path).unwrap();
        assert_eq!(config.graph.kind, GraphKind::Grid);
        assert_eq!(config.graph.blocked, vec![[1, 0], [1, 1]]);
        assert_eq!(config.experiment.trials, 5);
        assert_eq!(config.experiment.seed, 42);
        assert_eq!(config.experiment.source, None);
        assert_eq!(config.output.runs_csv, PathBuf::from("out/runs.csv"));
        assert_eq!(config.algorithm().unwrap(), Algorithm::AStar);
        assert_eq!(config.heuristic_kind().unwrap(), HeuristicKind::Manhattan);
        config.validate().unwrap();
    }

    #[test]
    fn test_load_toml() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "snap.toml",
            r#"
[graph]
type = "snap"
path = "data/facebook_combined.txt"

[experiment]
graph_name = "facebook"
graph_type = "snap"
algorithm = "Dijkstra"
seed = 7
source = 0
destination = 10

[output]
runs_csv = "runs.csv"
"#,
        );

        let config = ExperimentFile::load(&path).unwrap();
        assert_eq!(config.graph.kind, GraphKind::Snap);
        assert_eq!(
            config.graph.path,
            Some(PathBuf::from("data/facebook_combined.txt"))
        );
        assert!(!config.graph.directed);
        assert_eq!(config.experiment.trials, 1);
        assert_eq!(config.experiment.seed, 7);
        assert_eq!(config.experiment.source, Some(0));
        assert_eq!(config.experiment.destination, Some(10));
        assert_eq!(config.heuristic_kind().unwrap(), HeuristicKind::None);
        config.validate().unwrap();
    }

    #[test]
    fn test_load_yaml() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "edges.yml",
            "graph:\n  type: edge_list\n  path: edges.txt\n  directed: true\n  weighted: true\n\
             experiment:\n  graph_name: roads\n  graph_type: edge_list\n  algorithm: BFS\n\
             output:\n  runs_csv: runs.csv\n",
        );

        let config = ExperimentFile::load(&path).unwrap();
        assert_eq!(config.graph.kind, GraphKind::EdgeList);
        assert!(config.graph.directed);
        assert!(config.graph.weighted);
        assert_eq!(config.algorithm().unwrap(), Algorithm::Bfs);
    }

    #[test]
    fn test_unknown_extension_is_unsupported() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "config.ini", GRID_JSON);
        let err = ExperimentFile::load(&path).unwrap_err();
        assert!(matches!(err, PathlabError::Unsupported { .. }));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = ExperimentFile::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, PathlabError::NotFound { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let dir = tempdir().unwrap();
        let content = GRID_JSON.replace("\"trials\": 5", "\"trails\": 5");
        let path = write(dir.path(), "typo.json", &content);
        let err = ExperimentFile::load(&path).unwrap_err();
        assert!(matches!(err, PathlabError::Json(_)));
        assert!(err.to_string().contains("trails"));
    }

    #[test]
    fn test_unknown_graph_type_rejected() {
        let dir = tempdir().unwrap();
        let content = GRID_JSON.replace("\"type\": \"grid\"", "\"type\": \"hex\"");
        let path = write(dir.path(), "hex.json", &content);
        assert!(ExperimentFile::load(&path).is_err());
    }

    fn grid_config() -> ExperimentFile {
        serde_json::from_str(GRID_JSON).unwrap()
    }

    #[test]
    fn test_validate_grid_dimensions() {
        let mut config = grid_config();
        config.graph.width = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PathlabError::InvalidValue { .. }));
        assert!(err.to_string().contains("0x3"));
    }

    #[test]
    fn test_validate_dataset_path_required() {
        let mut config = grid_config();
        config.graph.kind = GraphKind::EdgeList;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("graph.path"));
    }

    #[test]
    fn test_validate_trials() {
        let mut config = grid_config();
        config.experiment.trials = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_unknown_algorithm() {
        let mut config = grid_config();
        config.experiment.algorithm = "Floyd".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PathlabError::Unsupported { .. }));
    }

    #[test]
    fn test_validate_embedding_requirements() {
        let mut config = grid_config();
        config.experiment.heuristic = Some("embedding_cosine".to_string());
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("embedding_path"));

        config.experiment.embedding_path = Some(PathBuf::from("emb.txt"));
        assert!(config
            .validate()
            .unwrap_err()
            .to_string()
            .contains("embedding_dim"));

        config.experiment.embedding_dim = 16;
        config.validate().unwrap();
    }
}
