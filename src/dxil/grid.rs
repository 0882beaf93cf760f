//! Hand-authored cross-reference grids.
//!
//! A grid is comma-separated text: the first line holds column labels,
//! every other line starts with a row label followed by one cell per column.

use super::error::TableError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    pub name: String,
    /// First line, including the corner cell
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
impl LabelGrid {
    /// Parse a grid, skipping blank lines. Every row must have as many cells as the header.
    pub fn parse(name: &str, text: &str) -> Result<Self, TableError> {
        let mut lines = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| line.split(',').map(|cell| cell.trim().to_owned()).collect::<Vec<_>>());
        let header = lines
            .next()
            .ok_or_else(|| TableError::EmptyTable(name.to_owned()))?;
        let rows: Vec<Vec<String>> = lines.collect();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(TableError::NotRectangular {
                    table: name.to_owned(),
                    row: i + 1,
                    expected: header.len(),
                    found: row.len(),
                });
            }
        }
        Ok(Self {
            name: name.to_owned(),
            header,
            rows,
        })
    }

    pub fn row_labels(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row[0].as_str()).collect()
    }

    pub fn column_labels(&self) -> Vec<&str> {
        self.header[1..].iter().map(String::as_str).collect()
    }

    pub fn cell(&self, row: &str, column: &str) -> Option<&str> {
        let col = self.header[1..].iter().position(|c| c == column)? + 1;
        let row = self.rows.iter().find(|r| r[0] == row)?;
        Some(row[col].as_str())
    }
}

/// Which set of labels a [LabelCheck] compares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridAxis {
    Rows,
    Columns,
}

/// A requirement that one axis of a grid lists exactly the given labels, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCheck {
    pub grid: LabelGrid,
    pub axis: GridAxis,
    /// Where the expected labels come from, for diagnostics
    pub labels_name: String,
    pub labels: Vec<String>,
}
impl LabelCheck {
    pub fn new(grid: &LabelGrid, axis: GridAxis, labels_name: &str, labels: &[&str]) -> Self {
        Self {
            grid: grid.clone(),
            axis,
            labels_name: labels_name.to_owned(),
            labels: labels.iter().map(|&l| l.to_owned()).collect(),
        }
    }
}
