//! Clear & collapse - detect full rows and compact the grid
//!
//! Rows are all-or-nothing. Detection scans a row range bottom to top; collapse then
//! removes the detected rows from the highest index to the lowest, each time shifting
//! everything above down by one row and zeroing the top row. Removing the lower row
//! first would misalign the rows above it.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{EMPTY_CELL, FIELD_HEIGHT};

/// Indices of cleared rows, ascending
pub type ClearedRows = ArrayVec<usize, FIELD_HEIGHT>;

/// Full rows within `[min_y, max_y]`, ascending.
///
/// The range is clamped to the field; an inverted range yields nothing.
pub fn full_rows(grid: &Grid, min_y: i32, max_y: i32) -> ClearedRows {
    let mut rows = ClearedRows::new();
    let lo = min_y.max(0);
    let hi = max_y.min(FIELD_HEIGHT as i32 - 1);
    if lo > hi {
        return rows;
    }
    for y in lo as usize..=hi as usize {
        if grid.is_row_full(y) {
            rows.push(y);
        }
    }
    rows
}

/// Remove a single row, shifting every row above it down by one
pub fn collapse_row(grid: &mut Grid, line: usize) {
    if line >= FIELD_HEIGHT {
        return;
    }
    let rows = grid.rows_mut();
    rows.copy_within(line + 1.., line);
    rows[FIELD_HEIGHT - 1].fill(EMPTY_CELL);
}

/// Remove rows given in ascending order, processing from the highest index down
pub fn collapse(grid: &mut Grid, rows: &[usize]) {
    for &line in rows.iter().rev() {
        collapse_row(grid, line);
    }
}

/// Detect full rows within `[min_y, max_y]`, collapse them, and return their indices
pub fn resolve(grid: &mut Grid, min_y: i32, max_y: i32) -> ClearedRows {
    let rows = full_rows(grid, min_y, max_y);
    collapse(grid, &rows);
    rows
}
