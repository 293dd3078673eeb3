//! Tier classification and per-question diagnostics
//!
//! All stages read the merged [`RawTable`](crate::ingest::RawTable) and
//! produce in-memory values that live for one analysis run only.

mod answer_key;
mod quantile;
mod responses;
mod stats;
mod students;

pub use answer_key::{AnswerKey, KeyEntry};
pub use quantile::quantile;
pub use responses::{PlaceholderPolicy, ResponseMatrix, PLACEHOLDER};
pub use stats::{all_question_stats, question_stats, ChoiceDistribution, QuestionStats, CHOICES};
pub use students::{StudentRecord, StudentTable, Tier, TierCutoffs};

use crate::ingest::RawTable;
use crate::Result;

/// Percentile for the upper-tier cutoff
pub const UPPER_QUANTILE: f64 = 0.73;

/// Percentile for the lower-tier cutoff
pub const LOWER_QUANTILE: f64 = 0.27;

/// Every derived table of one analysis run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub key: AnswerKey,
    pub students: StudentTable,
    pub matrix: ResponseMatrix,
    pub stats: Vec<QuestionStats>,
    /// Key questions with no response column, skipped from the stats
    pub skipped_questions: Vec<u32>,
}

impl Analysis {
    /// Run the classification and per-question stages over a merged table.
    pub fn from_table(
        table: &RawTable,
        score_label: &str,
        policy: PlaceholderPolicy,
    ) -> Result<Self> {
        let key = AnswerKey::extract(table);
        let students = StudentTable::build(table, score_label)?;
        let mut matrix = ResponseMatrix::extract(table);
        matrix.normalize_placeholders(&key, policy);

        let stats = all_question_stats(&key, &students, &matrix);
        let skipped_questions = key
            .entries()
            .iter()
            .map(|e| e.question)
            .filter(|&q| !matrix.has_question(q))
            .collect();

        Ok(Self {
            key,
            students,
            matrix,
            stats,
            skipped_questions,
        })
    }
}
