//! Examinar CLI
//!
//! Item-analysis entry point for the examinar library.
//!
//! # Usage
//!
//! ```bash
//! # Analyze one or more answer-sheet exports and write charts
//! examinar analyze class1.csv class2.csv --output-dir charts
//!
//! # Treat "." responses as missing instead of auto-credit
//! examinar analyze class1.csv --placeholder missing
//!
//! # Report pipeline diagnostics
//! examinar inspect class1.csv
//!
//! # Terminal bar charts per question
//! examinar inspect class1.csv --format bars
//! ```

use clap::Parser;
use examinar::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
