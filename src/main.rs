//! Pathlab - shortest-path experiment CLI
//!
//! Runs BFS, Dijkstra and A* over grids and edge-list datasets, either as
//! single queries or as seeded batches of trials written to CSV.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use pathlab_core::error::PathlabError;
use pathlab_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // `--format` may not have been parsed yet, so look at raw argv
        Err(err) if wants_json_errors(env::args().skip(1)) => {
            if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                err.exit();
            }
            let error = from_clap(&err);
            eprintln!("{}", error.to_json());
            return exit_code(&error);
        }
        Err(err) => err.exit(),
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("warning: logging disabled: {e}");
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match cli.format {
                OutputFormat::Json => eprintln!("{}", e.to_json()),
                OutputFormat::Human if !cli.quiet => eprintln!("error: {e}"),
                OutputFormat::Human => {}
            }
            exit_code(&e)
        }
    }
}

fn exit_code(error: &PathlabError) -> ExitCode {
    ExitCode::from(error.exit_code() as u8)
}

fn from_clap(err: &clap::Error) -> PathlabError {
    match err.kind() {
        ErrorKind::ValueValidation
        | ErrorKind::InvalidValue
        | ErrorKind::InvalidSubcommand
        | ErrorKind::UnknownArgument
        | ErrorKind::MissingRequiredArgument
        | ErrorKind::MissingSubcommand
        | ErrorKind::ArgumentConflict => PathlabError::UsageError(err.to_string()),
        _ => PathlabError::Other(err.to_string()),
    }
}

fn wants_json_errors(mut args: impl Iterator<Item = String>) -> bool {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--format=json" => return true,
            "--format" if args.next().as_deref() == Some("json") => return true,
            _ => {}
        }
    }
    false
}
