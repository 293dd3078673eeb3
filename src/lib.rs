//! Examinar: exam answer-sheet item analysis
//!
//! Ingests the header-less answer/score sheet exports produced by a school
//! assessment system, classifies students into performance tiers from total
//! score percentiles, and derives per-question diagnostics: selection-ratio
//! distributions per tier, correctness rates, and the discrimination index
//! (upper-tier correctness minus lower-tier correctness).
//!
//! # Features
//!
//! - Multi-file merge with explicit per-file roles (primary carries the
//!   header and answer-key rows, supplementary files carry students only)
//! - Tier classification at the 73rd/27th score percentiles
//! - Per-question selection ratios and discrimination index
//! - SVG chart rendering: score distribution scatter and one composite
//!   chart per question
//! - Terminal and JSON diagnostic reports
//!
//! # Example
//!
//! ```no_run
//! use examinar::analysis::{AnswerKey, PlaceholderPolicy, ResponseMatrix, StudentTable};
//! use examinar::ingest::{self, FileRole};
//!
//! let table = ingest::merge_files(&[("exam.csv".as_ref(), FileRole::Primary)])?;
//! let key = AnswerKey::extract(&table);
//! let students = StudentTable::build(&table, ingest::DEFAULT_SCORE_LABEL)?;
//! let mut responses = ResponseMatrix::extract(&table);
//! responses.normalize_placeholders(&key, PlaceholderPolicy::Credit);
//! # Ok::<(), examinar::Error>(())
//! ```

pub mod analysis;
pub mod chart;
pub mod cli;
pub mod ingest;

mod error;

pub use error::{Error, Result};
