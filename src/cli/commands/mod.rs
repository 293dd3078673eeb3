//! CLI command implementations

mod analyze;
mod inspect;

use crate::cli::args::{Cli, Command};
use crate::cli::LogLevel;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let log_level = LogLevel::from_flags(cli.verbose, cli.quiet);

    match cli.command {
        Command::Analyze(args) => analyze::run_analyze(args, log_level),
        Command::Inspect(args) => inspect::run_inspect(args, log_level),
    }
}
