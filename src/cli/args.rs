//! CLI argument types

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::analysis::PlaceholderPolicy;
use crate::ingest::DEFAULT_SCORE_LABEL;

/// Examinar: exam answer-sheet item analysis
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "examinar")]
#[command(version)]
#[command(about = "Tier classification and per-question diagnostics for exam answer-sheet exports")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Analyze answer sheets and write SVG charts
    Analyze(AnalyzeArgs),

    /// Report pipeline diagnostics without writing charts
    Inspect(InspectArgs),
}

/// Options shared by both commands
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InputArgs {
    /// Answer-sheet exports; the first file carries the header and answer
    /// key, later files contribute student rows only
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Header label of the total-score column
    #[arg(long, default_value = DEFAULT_SCORE_LABEL)]
    pub score_label: String,

    /// What a "." response cell means: credit rewrites it to the correct
    /// answer (the export's own convention), missing drops it
    #[arg(long, value_enum, default_value_t = Placeholder::Credit)]
    pub placeholder: Placeholder,
}

/// Arguments for the analyze command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Directory the charts are written into (created if absent)
    #[arg(short, long, default_value = "charts")]
    pub output_dir: PathBuf,
}

/// Arguments for the inspect command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Restrict per-question output to one question number
    #[arg(long, value_name = "N")]
    pub question: Option<u32>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Placeholder policy flag
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Credit,
    Missing,
}

impl From<Placeholder> for PlaceholderPolicy {
    fn from(flag: Placeholder) -> Self {
        match flag {
            Placeholder::Credit => Self::Credit,
            Placeholder::Missing => Self::Missing,
        }
    }
}

/// Inspect output format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text report
    Text,
    /// Pretty-printed JSON
    Json,
    /// Text report plus terminal bar charts
    Bars,
}
