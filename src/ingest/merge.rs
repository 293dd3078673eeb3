//! Multi-file merge with explicit per-file roles

use std::path::Path;

use serde::Serialize;

use super::sheet::{read_sheet, Sheet};
use super::{PRIMARY_MARKER_COL, ROSTER_COL, STUDENT_START_ROW};
use crate::{Error, Result};

/// Role of one uploaded file in the merge.
///
/// The primary file contributes the header and answer-key rows along with
/// its students; supplementary files contribute student rows only, since
/// their header/key rows duplicate the primary's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileRole {
    Primary,
    Supplementary,
}

impl FileRole {
    /// Row filter for this role: the primary keeps rows with a non-empty
    /// marker column (which the header/key rows have and stray footer rows
    /// lack), supplementary files keep rows with a non-empty roster id.
    fn keeps(self, row: &[String]) -> bool {
        let col = match self {
            Self::Primary => PRIMARY_MARKER_COL,
            Self::Supplementary => ROSTER_COL,
        };
        row.get(col).is_some_and(|cell| !cell.is_empty())
    }
}

impl std::fmt::Display for FileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Supplementary => write!(f, "supplementary"),
        }
    }
}

/// Per-file accounting from the merge, kept for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct SheetSummary {
    pub path: String,
    pub role: FileRole,
    pub rows_read: usize,
    pub rows_kept: usize,
}

/// The merged, header-less grid all downstream stages read from.
///
/// Immutable after the merge; row order within each file and file order
/// across files are preserved.
#[derive(Debug, Clone)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
    summaries: Vec<SheetSummary>,
}

impl RawTable {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (row, col), empty string when out of range.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    /// Widest row in the table.
    pub fn n_cols(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of student rows (rows from the fixed student offset on).
    pub fn n_student_rows(&self) -> usize {
        self.n_rows().saturating_sub(STUDENT_START_ROW)
    }

    pub fn summaries(&self) -> &[SheetSummary] {
        &self.summaries
    }
}

/// Read and merge uploaded files. The first file is the primary, the rest
/// are supplementary.
pub fn merge_files(files: &[(&Path, FileRole)]) -> Result<RawTable> {
    if files.is_empty() {
        return Err(Error::NoInputFiles);
    }

    let mut sheets = Vec::with_capacity(files.len());
    for (path, role) in files {
        let sheet = read_sheet(path)?;
        sheets.push((path.display().to_string(), *role, sheet));
    }
    merge_sheets(sheets)
}

/// Merge already-read sheets into one [`RawTable`].
///
/// Each sheet's rows pass through its role's filter; retained rows are
/// concatenated in order. A merged table too short to contain any student
/// row is a structural error.
pub fn merge_sheets(sheets: Vec<(String, FileRole, Sheet)>) -> Result<RawTable> {
    if sheets.is_empty() {
        return Err(Error::NoInputFiles);
    }

    let mut rows = Vec::new();
    let mut summaries = Vec::new();
    for (path, role, sheet) in sheets {
        let rows_read = sheet.n_rows();
        let kept: Vec<Vec<String>> = sheet
            .into_rows()
            .into_iter()
            .filter(|row| role.keeps(row))
            .collect();
        summaries.push(SheetSummary {
            path,
            role,
            rows_read,
            rows_kept: kept.len(),
        });
        rows.extend(kept);
    }

    if rows.len() <= STUDENT_START_ROW {
        return Err(Error::TruncatedTable {
            rows: rows.len(),
            min: STUDENT_START_ROW + 1,
        });
    }

    Ok(RawTable { rows, summaries })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[&str]]) -> Sheet {
        Sheet::from_rows(
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect::<Vec<_>>()),
        )
    }

    fn primary_sheet() -> Sheet {
        // marker column (index 2) present on header/key/reserved/student rows,
        // absent on the trailing footer row; roster column (index 1) present
        // on student rows only
        sheet(&[
            &["", "", "성명", "1", "2", "과목총점"],
            &["", "", "정답", "3", "1", ""],
            &["", "", "-", "", "", ""],
            &["", "1-01", "김", "3", "1", "90"],
            &["", "1-02", "이", "1", "1", "40"],
            &["합계", "", "", "", "", ""],
        ])
    }

    #[test]
    fn no_files_is_an_error() {
        assert!(matches!(merge_sheets(Vec::new()), Err(Error::NoInputFiles)));
    }

    #[test]
    fn primary_filter_drops_rows_without_marker() {
        let table = merge_sheets(vec![(
            "a.csv".to_string(),
            FileRole::Primary,
            primary_sheet(),
        )])
        .unwrap();
        // footer row dropped, everything else kept
        assert_eq!(table.n_rows(), 5);
        assert_eq!(table.summaries()[0].rows_read, 6);
        assert_eq!(table.summaries()[0].rows_kept, 5);
    }

    #[test]
    fn supplementary_contributes_students_only() {
        let extra = sheet(&[
            &["", "", "성명", "1", "2", "과목총점"],
            &["", "", "정답", "3", "1", ""],
            &["", "", "-", "", "", ""],
            &["", "2-01", "박", "2", "1", "70"],
        ]);
        let table = merge_sheets(vec![
            ("a.csv".to_string(), FileRole::Primary, primary_sheet()),
            ("b.csv".to_string(), FileRole::Supplementary, extra),
        ])
        .unwrap();
        // supplementary header/key/reserved rows have an empty roster column
        // and are filtered out; only the student row survives
        assert_eq!(table.n_rows(), 6);
        assert_eq!(table.cell(5, 1), "2-01");
        assert_eq!(table.summaries()[1].rows_kept, 1);
    }

    #[test]
    fn header_and_key_rows_not_duplicated() {
        let table = merge_sheets(vec![
            ("a.csv".to_string(), FileRole::Primary, primary_sheet()),
            (
                "b.csv".to_string(),
                FileRole::Supplementary,
                primary_sheet(),
            ),
        ])
        .unwrap();
        let key_rows = (0..table.n_rows())
            .filter(|&r| table.cell(r, 2) == "정답")
            .count();
        assert_eq!(key_rows, 1);
    }

    #[test]
    fn merged_table_without_student_rows_is_fatal() {
        let tiny = sheet(&[&["", "", "x", "1"], &["", "", "x", "3"]]);
        let result = merge_sheets(vec![("a.csv".to_string(), FileRole::Primary, tiny)]);
        assert!(matches!(result, Err(Error::TruncatedTable { rows: 2, .. })));
    }
}
