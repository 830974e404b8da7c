//! Constraint-checking primitives. Everything here is pure and read-only
//! over the grid; empties count as wildcards in unit validity.

use itertools::Itertools;

use crate::grid::{CellValue, Grid};

/// True iff `num` can be placed at `(row, col)` without clashing with the
/// row, column, or 3x3 box. The cell itself is ignored, so the check also
/// works on a cell whose current value is under test.
pub fn is_valid_placement(grid: &Grid, row: usize, col: usize, num: u8) -> bool {
    for c in 0..9 {
        if c != col && grid.get(row, c) == Some(num) {
            return false;
        }
    }
    for r in 0..9 {
        if r != row && grid.get(r, col) == Some(num) {
            return false;
        }
    }
    let (box_row, box_col) = (row / 3 * 3, col / 3 * 3);
    for r in box_row..box_row + 3 {
        for c in box_col..box_col + 3 {
            if (r != row || c != col) && grid.get(r, c) == Some(num) {
                return false;
            }
        }
    }
    true
}

fn no_dupes(values: impl Iterator<Item = CellValue>) -> bool {
    let mut seen = 0u16;
    for v in values.flatten() {
        let bit = 1 << v;
        if seen & bit != 0 {
            return false;
        }
        seen |= bit;
    }
    true
}

pub fn is_valid_row(grid: &Grid, row: usize) -> bool {
    no_dupes((0..9).map(|c| grid.get(row, c)))
}

pub fn is_valid_column(grid: &Grid, col: usize) -> bool {
    no_dupes((0..9).map(|r| grid.get(r, col)))
}

/// Boxes are indexed 0..=8 in row-major order.
pub fn is_valid_box(grid: &Grid, index: usize) -> bool {
    let (box_row, box_col) = (index / 3 * 3, index % 3 * 3);
    no_dupes(
        (box_row..box_row + 3)
            .cartesian_product(box_col..box_col + 3)
            .map(|(r, c)| grid.get(r, c)),
    )
}

/// Valid means no duplicates anywhere; partial grids qualify.
pub fn is_valid_sudoku(grid: &Grid) -> bool {
    (0..9).all(|i| is_valid_row(grid, i) && is_valid_column(grid, i) && is_valid_box(grid, i))
}

pub fn is_puzzle_complete(grid: &Grid) -> bool {
    grid.is_full() && is_valid_sudoku(grid)
}

/// Ascending candidates for an empty cell; empty for a filled cell.
pub fn possible_numbers(grid: &Grid, row: usize, col: usize) -> Vec<u8> {
    if grid.get(row, col).is_some() {
        return Vec::new();
    }
    (1..=9)
        .filter(|&num| is_valid_placement(grid, row, col, num))
        .collect()
}

/// Candidate lists for every cell, the pure core of the game layer's
/// auto-notes feature. Filled cells get an empty list.
pub fn auto_notes(grid: &Grid) -> [[Vec<u8>; 9]; 9] {
    std::array::from_fn(|r| std::array::from_fn(|c| possible_numbers(grid, r, c)))
}
