//! Answer-key extraction
//!
//! Pairs the header row with the key row from the first question column on
//! and keeps only pairs where both cells are pure digit strings. That one
//! filter removes label columns, blank padding, and key cells the export
//! left malformed; dropped pairs whose header still looked like a question
//! number are counted so the filtering stays observable.

use serde::Serialize;

use crate::ingest::{is_digits, RawTable, FIRST_QUESTION_COL, HEADER_ROW, KEY_ROW};

/// One question's correct answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KeyEntry {
    pub question: u32,
    pub answer: u8,
}

/// Ordered mapping from question number to correct choice.
#[derive(Debug, Clone, Default)]
pub struct AnswerKey {
    entries: Vec<KeyEntry>,
    skipped: usize,
}

impl AnswerKey {
    /// Extract the key from the merged table's header and key rows.
    pub fn extract(table: &RawTable) -> Self {
        let mut entries: Vec<KeyEntry> = Vec::new();
        let mut skipped = 0;

        for col in FIRST_QUESTION_COL..table.n_cols() {
            let header = table.cell(HEADER_ROW, col);
            let key = table.cell(KEY_ROW, col);
            if is_digits(header) && is_digits(key) {
                // both fit in their integer types: a digit-only header is a
                // question number, a digit-only key cell is a choice
                if let (Ok(question), Ok(answer)) = (header.parse::<u32>(), key.parse::<u8>()) {
                    // a repeated question header keeps the later key cell,
                    // matching the response matrix keeping the later column
                    match entries.iter_mut().find(|e| e.question == question) {
                        Some(existing) => existing.answer = answer,
                        None => entries.push(KeyEntry { question, answer }),
                    }
                    continue;
                }
            }
            if is_digits(header) {
                skipped += 1;
            }
        }

        Self { entries, skipped }
    }

    /// Entries in original column order.
    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }

    /// Correct choice for a question, if the key has it.
    pub fn answer(&self, question: u32) -> Option<u8> {
        self.entries
            .iter()
            .find(|e| e.question == question)
            .map(|e| e.answer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Columns with a numeric-looking header whose key cell was dropped by
    /// the digit filter.
    pub fn skipped_entries(&self) -> usize {
        self.skipped
    }
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
            &["", "", "성명", "1", "2", "과목총점", "3"],
            &["", "", "정답", "3", "5", "", "2"],
            &["", "", "-", "", "", "", ""],
            &["", "1-01", "김", "3", "5", "95", "2"],
        ])
    }

    #[test]
    fn keeps_digit_pairs_in_column_order() {
        let key = AnswerKey::extract(&fixture());
        assert_eq!(
            key.entries(),
            &[
                KeyEntry {
                    question: 1,
                    answer: 3
                },
                KeyEntry {
                    question: 2,
                    answer: 5
                },
                KeyEntry {
                    question: 3,
                    answer: 2
                },
            ]
        );
        assert_eq!(key.answer(2), Some(5));
        assert_eq!(key.answer(9), None);
    }

    #[test]
    fn label_columns_are_not_questions() {
        let key = AnswerKey::extract(&fixture());
        // 과목총점 column has a blank key cell and a non-digit header; it is
        // filtered, not skipped-counted
        assert_eq!(key.len(), 3);
        assert_eq!(key.skipped_entries(), 0);
    }

    #[test]
    fn repeated_question_keeps_the_later_key() {
        let key = AnswerKey::extract(&table(&[
            &["", "", "성명", "4", "4"],
            &["", "", "정답", "1", "5"],
            &["", "", "-", "", ""],
            &["", "1-01", "김", "1", "5"],
        ]));
        assert_eq!(key.len(), 1);
        assert_eq!(key.answer(4), Some(5));
    }

    #[test]
    fn numeric_header_with_bad_key_is_counted() {
        let key = AnswerKey::extract(&table(&[
            &["", "", "성명", "1", "2"],
            &["", "", "정답", "3", "x"],
            &["", "", "-", "", ""],
            &["", "1-01", "김", "3", "1"],
        ]));
        assert_eq!(key.len(), 1);
        assert_eq!(key.skipped_entries(), 1);
    }
}
