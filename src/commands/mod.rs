//! CLI commands for pathlab

pub mod dispatch;
pub mod path;
pub mod run;
