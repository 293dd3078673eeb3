//! Response matrix extraction and placeholder normalization

use std::collections::BTreeMap;

use crate::ingest::{to_number, RawTable, HEADER_ROW, STUDENT_START_ROW};

use super::AnswerKey;

/// Response cell value the export writes when the student's answer matches
/// the key.
pub const PLACEHOLDER: &str = ".";

/// What a placeholder response means.
///
/// The export's own convention is [`Credit`](Self::Credit): the marker
/// stands for the correct answer. [`Missing`](Self::Missing) treats it as
/// no response instead, which removes it from every denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderPolicy {
    Credit,
    Missing,
}

/// Per-question response series, keyed by student row id.
///
/// Question columns are the header cells that read as numbers, which is
/// what separates them from label columns. Series are dense over the
/// student row range, so a record's `row_id` indexes every series directly;
/// joining to the student table goes through that id, never through row
/// position.
#[derive(Debug, Clone, Default)]
pub struct ResponseMatrix {
    columns: BTreeMap<u32, Vec<Option<String>>>,
}

impl ResponseMatrix {
    /// Extract question columns from the merged table.
    pub fn extract(table: &RawTable) -> Self {
        let n_rows = table.n_student_rows();
        let mut columns = BTreeMap::new();

        for col in 0..table.n_cols() {
            let Some(question) = question_number(table.cell(HEADER_ROW, col)) else {
                continue;
            };
            let series: Vec<Option<String>> = (0..n_rows)
                .map(|i| {
                    let cell = table.cell(STUDENT_START_ROW + i, col);
                    (!cell.is_empty()).then(|| cell.to_string())
                })
                .collect();
            // a repeated question header keeps the later column, as the
            // export puts corrected reprints to the right
            columns.insert(question, series);
        }

        Self { columns }
    }

    /// Apply the placeholder policy for every question the key covers.
    /// Idempotent: a second pass finds no placeholder left.
    pub fn normalize_placeholders(&mut self, key: &AnswerKey, policy: PlaceholderPolicy) {
        for entry in key.entries() {
            let Some(series) = self.columns.get_mut(&entry.question) else {
                continue;
            };
            for cell in series.iter_mut() {
                if cell.as_deref() == Some(PLACEHOLDER) {
                    *cell = match policy {
                        PlaceholderPolicy::Credit => Some(entry.answer.to_string()),
                        PlaceholderPolicy::Missing => None,
                    };
                }
            }
        }
    }

    pub fn has_question(&self, question: u32) -> bool {
        self.columns.contains_key(&question)
    }

    /// The response a student gave to a question, `None` when either the
    /// question column or the response is missing.
    pub fn response(&self, question: u32, row_id: usize) -> Option<&str> {
        self.columns
            .get(&question)?
            .get(row_id)?
            .as_deref()
    }

    pub fn questions(&self) -> impl Iterator<Item = u32> + '_ {
        self.columns.keys().copied()
    }

    pub fn n_questions(&self) -> usize {
        self.columns.len()
    }
}

/// Question number of a header cell: a numeric header with an integral
/// value. Label columns and blank padding read as `None`.
fn question_number(header: &str) -> Option<u32> {
    let n = to_number(header)?;
    (n.fract() == 0.0 && n >= 0.0 && n <= f64::from(u32::MAX)).then(|| n as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::{merge_sheets, FileRole, Sheet};

    fn table(rows: &[&[&str]]) -> RawTable {
        let sheet = Sheet::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect::<Vec<_>>()),
        );
        merge_sheets(vec![("t.csv".to_string(), FileRole::Primary, sheet)]).unwrap()
    }

    fn fixture() -> RawTable {
        table(&[
            &["", "", "성명", "1", "2", "과목총점", "5"],
            &["", "", "정답", "3", "1", "", "2"],
            &["", "", "-", "", "", "", ""],
            &["", "1-01", "김", "3", ".", "95", "."],
            &["", "1-02", "이", ".", "4", "80", "1"],
            &["", "1-03", "박", "2", "", "40", "5"],
        ])
    }

    #[test]
    fn numeric_headers_become_question_columns() {
        let matrix = ResponseMatrix::extract(&fixture());
        assert_eq!(matrix.questions().collect::<Vec<_>>(), vec![1, 2, 5]);
        assert!(!matrix.has_question(3));
        assert_eq!(matrix.response(1, 0), Some("3"));
        assert_eq!(matrix.response(2, 2), None);
    }

    #[test]
    fn credit_policy_rewrites_placeholder_to_answer() {
        let key = AnswerKey::extract(&fixture());
        let mut matrix = ResponseMatrix::extract(&fixture());
        matrix.normalize_placeholders(&key, PlaceholderPolicy::Credit);

        assert_eq!(matrix.response(2, 0), Some("1"));
        assert_eq!(matrix.response(1, 1), Some("3"));
        assert_eq!(matrix.response(5, 0), Some("2"));
        // non-placeholder responses untouched
        assert_eq!(matrix.response(2, 1), Some("4"));
    }

    #[test]
    fn missing_policy_blanks_placeholders() {
        let key = AnswerKey::extract(&fixture());
        let mut matrix = ResponseMatrix::extract(&fixture());
        matrix.normalize_placeholders(&key, PlaceholderPolicy::Missing);

        assert_eq!(matrix.response(2, 0), None);
        assert_eq!(matrix.response(1, 1), None);
    }

    #[test]
    fn normalization_is_idempotent() {
        let key = AnswerKey::extract(&fixture());
        let mut once = ResponseMatrix::extract(&fixture());
        once.normalize_placeholders(&key, PlaceholderPolicy::Credit);
        let mut twice = once.clone();
        twice.normalize_placeholders(&key, PlaceholderPolicy::Credit);

        for q in [1, 2, 5] {
            for row in 0..3 {
                assert_eq!(once.response(q, row), twice.response(q, row));
            }
        }
    }
}
