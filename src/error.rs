//! Crate-level error type
//!
//! Structural problems with the uploaded sheets (nothing to read, a file
//! that is not a tabular grid, a missing required column) abort the run.
//! Per-cell data problems are never errors: unparseable values are coerced
//! to missing and excluded from the affected denominators.

/// Errors that abort an analysis run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no input files supplied")]
    NoInputFiles,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse tabular file: {0}")]
    Csv(#[from] csv::Error),

    #[error("merged table has {rows} rows, need at least {min} (header, key, reserved, students)")]
    TruncatedTable { rows: usize, min: usize },

    #[error("no column labeled {label:?} in the header row")]
    MissingScoreColumn { label: String },
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
