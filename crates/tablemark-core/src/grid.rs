//! Grid coordinates and the read-only table content provider.

use crate::config::EditorConfig;
use serde::{Deserialize, Serialize};

/// A single grid cell in 1-indexed coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellPoint {
    /// Column, starting at 1.
    pub col: u32,
    /// Row, starting at 1.
    pub row: u32,
}

impl CellPoint {
    pub const fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Convert 0-indexed array indices (`cells[row][col]`) to grid coordinates.
    pub const fn from_index(row_idx: usize, col_idx: usize) -> Self {
        Self {
            col: col_idx as u32 + 1,
            row: row_idx as u32 + 1,
        }
    }

    /// The 0-indexed `(row, col)` array position of this cell.
    pub fn to_index(self) -> Option<(usize, usize)> {
        if self.row == 0 || self.col == 0 {
            return None;
        }
        Some((self.row as usize - 1, self.col as usize - 1))
    }
}

/// Number of visible rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: u32,
    pub cols: u32,
}

impl GridSize {
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Check if a cell lies inside the grid.
    pub fn contains(&self, point: CellPoint) -> bool {
        (1..=self.rows).contains(&point.row) && (1..=self.cols).contains(&point.col)
    }

    /// Snap a cell to the nearest cell inside the grid.
    pub fn clamp(&self, point: CellPoint) -> CellPoint {
        CellPoint {
            col: point.col.clamp(1, self.cols.max(1)),
            row: point.row.clamp(1, self.rows.max(1)),
        }
    }
}

/// Table content, indexed `[row][col]` from 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableGrid {
    cells: Vec<Vec<String>>,
}

impl TableGrid {
    pub fn new(cells: Vec<Vec<String>>) -> Self {
        Self { cells }
    }

    /// Text of a cell, or `None` past the end of the sheet data.
    pub fn cell(&self, point: CellPoint) -> Option<&str> {
        let (row, col) = point.to_index()?;
        self.cells.get(row)?.get(col).map(String::as_str)
    }

    /// Size of the actual sheet data (widest row wins).
    pub fn data_size(&self) -> GridSize {
        let cols = self.cells.iter().map(Vec::len).max().unwrap_or(0);
        GridSize::new(self.cells.len() as u32, cols as u32)
    }

    /// Visible size: the data padded to the configured minimum.
    pub fn size(&self, config: &EditorConfig) -> GridSize {
        let data = self.data_size();
        GridSize::new(data.rows.max(config.min_rows), data.cols.max(config.min_cols))
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.cells
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Spreadsheet column letters: 1 → "A", 26 → "Z", 27 → "AA".
pub fn column_to_letter(mut column: u32) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(b'A' + rem as u8);
        column = (column - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
