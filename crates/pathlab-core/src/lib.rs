//! Pathlab Core Library
//!
//! Shortest-path engine and experiment harness for comparing BFS, Dijkstra
//! and A* on grid and CSR graphs.

pub mod config;
pub mod error;
pub mod experiment;
pub mod graph;
pub mod io;
pub mod logging;
