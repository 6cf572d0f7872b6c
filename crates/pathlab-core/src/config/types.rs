//! Configuration type definitions

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root of an experiment configuration file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentFile {
    /// How to build or load the graph
    pub graph: GraphSection,

    /// Trial settings
    pub experiment: ExperimentSection,

    /// Where results go
    pub output: OutputSection,
}

/// Source of the experiment graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    /// Implicit 4-connected grid
    Grid,
    /// SNAP "combined" undirected edge list
    Snap,
    /// Generic whitespace/comma separated edge list
    EdgeList,
}

impl GraphKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphKind::Grid => "grid",
            GraphKind::Snap => "snap",
            GraphKind::EdgeList => "edge_list",
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphSection {
    #[serde(rename = "type")]
    pub kind: GraphKind,

    /// Grid width in cells
    #[serde(default)]
    pub width: usize,

    /// Grid height in cells
    #[serde(default)]
    pub height: usize,

    /// Untraversable grid cells as `[x, y]` pairs
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blocked: Vec<[i64; 2]>,

    /// Dataset file for `snap` and `edge_list`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Edge lists only; SNAP datasets are always undirected
    #[serde(default)]
    pub directed: bool,

    /// Edge lists only; reads a third weight column
    #[serde(default)]
    pub weighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentSection {
    /// Label copied into every result row
    pub graph_name: String,

    /// Label copied into every result row
    pub graph_type: String,

    /// `BFS`, `Dijkstra` or `AStar`
    pub algorithm: String,

    /// `none`, `zero`, `manhattan` or `embedding_cosine`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heuristic: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_path: Option<PathBuf>,

    #[serde(default)]
    pub embedding_dim: usize,

    #[serde(default = "default_trials")]
    pub trials: usize,

    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Fixed source vertex; drawn at random per trial when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<usize>,

    /// Fixed destination vertex; drawn at random per trial when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// CSV file that result rows are appended to
    pub runs_csv: PathBuf,
}

fn default_trials() -> usize {
    1
}

fn default_seed() -> u64 {
    42
}
