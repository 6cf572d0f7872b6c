//! Command dispatch logic for pathlab

use std::time::Instant;

use crate::cli::{Cli, Commands};
use crate::commands;
use pathlab_core::error::Result;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let result = match &cli.command {
        Commands::Run {
            config,
            trials,
            seed,
            output,
        } => {
            let overrides = commands::run::Overrides {
                trials: *trials,
                seed: *seed,
                runs_csv: output.clone(),
            };
            commands::run::execute(cli, config, overrides)
        }

        Commands::Path(args) => commands::path::execute(cli, args),
    };

    tracing::debug!(elapsed = ?start.elapsed(), ok = result.is_ok(), "command finished");
    result
}
