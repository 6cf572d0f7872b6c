//! CLI argument parsing for pathlab
//!
//! Global flags: --format, --quiet, --verbose, --log-level, --log-json

pub mod output;
pub mod parse;

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use pathlab_core::experiment::HeuristicKind;
use pathlab_core::graph::Algorithm;

pub use output::OutputFormat;
use parse::{parse_algorithm, parse_cell, parse_heuristic};

/// Pathlab - shortest-path experiments on grids and real-world graphs
#[derive(Parser, Debug)]
#[command(name = "pathlab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level or filter directive (overrides --verbose)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the trials described by an experiment config and append them to CSV
    Run {
        /// Experiment config (.json, .toml, .yaml)
        #[arg(long, short)]
        config: PathBuf,

        /// Override experiment.trials
        #[arg(long)]
        trials: Option<usize>,

        /// Override experiment.seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override output.runs_csv
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Find one shortest path and print it with its search metrics
    Path(PathArgs),
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("graph").required(true).args(["width", "edges"])))]
pub struct PathArgs {
    /// Grid width in cells
    #[arg(long, requires = "height")]
    pub width: Option<usize>,

    /// Grid height in cells
    #[arg(long, requires = "width")]
    pub height: Option<usize>,

    /// Blocked grid cell as x,y (repeatable)
    #[arg(long, value_parser = parse_cell, action = clap::ArgAction::Append)]
    pub blocked: Vec<(i64, i64)>,

    /// Edge list file (`u v [w]` per line)
    #[arg(long, conflicts_with_all = ["width", "height", "blocked"])]
    pub edges: Option<PathBuf>,

    /// Treat edge list lines as directed edges
    #[arg(long, requires = "edges")]
    pub directed: bool,

    /// Read a weight from the third edge list column
    #[arg(long, requires = "edges")]
    pub weighted: bool,

    /// BFS, Dijkstra or AStar
    #[arg(long, short, default_value = "Dijkstra", value_parser = parse_algorithm)]
    pub algorithm: Algorithm,

    /// none, zero, manhattan or embedding_cosine
    #[arg(long, default_value = "none", value_parser = parse_heuristic)]
    pub heuristic: HeuristicKind,

    /// Embedding file for the embedding_cosine heuristic
    #[arg(long)]
    pub embeddings: Option<PathBuf>,

    /// Values per embedding line
    #[arg(long, default_value_t = 0)]
    pub embedding_dim: usize,

    /// Source vertex (grid cell id, or dataset id for edge lists)
    #[arg(long)]
    pub from: u64,

    /// Destination vertex (grid cell id, or dataset id for edge lists)
    #[arg(long)]
    pub to: u64,
}
