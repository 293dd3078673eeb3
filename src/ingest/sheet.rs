//! Reading a single export file into a cell grid

use std::path::Path;

use crate::Result;

/// One export file as a grid of trimmed cells.
///
/// Rows may have differing widths (the export pads unevenly); accessors
/// treat out-of-range columns as empty cells.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Build a sheet from pre-split rows. Fields are trimmed.
    pub fn from_rows<R, F>(rows: R) -> Self
    where
        R: IntoIterator<Item = F>,
        F: IntoIterator<Item = String>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|field| field.trim().to_string())
                    .collect()
            })
            .collect();
        Self { rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (row, col), empty string when the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map_or("", String::as_str)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub(crate) fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }
}

/// Read one export file (CSV grid, no header row) into a [`Sheet`].
///
/// A file that cannot be parsed as a tabular grid is a fatal error; the
/// run produces no partial results.
pub fn read_sheet(path: &Path) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| field.trim().to_string())
                .collect::<Vec<_>>(),
        );
    }
    Ok(Sheet { rows })
}
