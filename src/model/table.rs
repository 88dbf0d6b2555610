//! Table types.

use serde::{Deserialize, Serialize};

/// A table whose first row is the header.
///
/// Every row has exactly the header's column count; rows are padded with
/// empty cells or truncated on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    /// Rows in the table, header first
    pub rows: Vec<Vec<String>>,
}

impl TableBlock {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a table from raw rows, shaping every row to the header width.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut table = Self::new();
        for row in rows {
            table.push_row(row);
        }
        table
    }

    /// Add a row, padding or truncating it to the header width.
    ///
    /// The first row pushed becomes the header and fixes the width.
    pub fn push_row(&mut self, mut cells: Vec<String>) {
        if let Some(width) = self.rows.first().map(|r| r.len()) {
            cells.resize(width, String::new());
        }
        self.rows.push(cells);
    }

    /// Get the number of rows (header included).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on the header).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.column_count() == 0
    }

    /// Get the header row.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[Vec<String>] {
        if self.rows.is_empty() {
            &[]
        } else {
            &self.rows[1..]
        }
    }

    /// Check the shape invariant: every row as wide as the header.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|r| r.len() == width)
    }

    /// Apply a function to every cell.
    pub fn map_cells(&mut self, mut f: impl FnMut(&str) -> String) {
        for row in &mut self.rows {
            for cell in row.iter_mut() {
                *cell = f(cell);
            }
        }
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
