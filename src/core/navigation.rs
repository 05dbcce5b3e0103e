//! Cursor traversal and word-boundary discovery over a [`Grid`].
//!
//! Moving forward never gets stuck: when the current line runs out the scan
//! continues on the following lines and finally wraps around the grid.
//! Moving backward only ever searches the current line; reaching its start
//! leaves the cursor where it is.

use alloc::vec::Vec;

use crate::core::common::{Coord, Direction};
use crate::core::grid::Grid;

/// Next open cell after (`row`, `col`) when typing in `direction`.
///
/// Order of preference: the rest of the current line, then the following
/// lines in reading order (rows for across, columns for down), then the
/// first open cell of the whole traversal order. Returns the input position
/// unchanged if the grid has no open cell.
pub fn find_next_cell(grid: &Grid, row: usize, col: usize, direction: Direction) -> Coord {
    let (rows, cols) = (grid.rows(), grid.cols());
    let forward = match direction {
        Direction::Across => {
            let rest_of_row = (col + 1..cols).map(|c| (row, c));
            let later_rows = (row + 1..rows).flat_map(|r| (0..cols).map(move |c| (r, c)));
            rest_of_row
                .chain(later_rows)
                .find(|&(r, c)| grid.is_open(r, c))
        }
        Direction::Down => {
            let rest_of_col = (row + 1..rows).map(|r| (r, col));
            let later_cols = (col + 1..cols).flat_map(|c| (0..rows).map(move |r| (r, c)));
            rest_of_col
                .chain(later_cols)
                .find(|&(r, c)| grid.is_open(r, c))
        }
    };
    forward
        .or_else(|| first_open_in(grid, direction))
        .unwrap_or((row, col))
}

/// Previous open cell before (`row`, `col`) on the current line only.
///
/// Returns the input position when no open cell precedes it on the line.
pub fn find_previous_cell(grid: &Grid, row: usize, col: usize, direction: Direction) -> Coord {
    let backward = match direction {
        Direction::Across => (0..col.min(grid.cols()))
            .rev()
            .map(|c| (row, c))
            .find(|&(r, c)| grid.is_open(r, c)),
        Direction::Down => (0..row.min(grid.rows()))
            .rev()
            .map(|r| (r, col))
            .find(|&(r, c)| grid.is_open(r, c)),
    };
    backward.unwrap_or((row, col))
}

/// Cells of the word for clue `number` in `direction`, from its start cell up
/// to the first blocked cell or the grid edge. Empty if there is no such clue.
pub fn word_cells(grid: &Grid, number: u16, direction: Direction) -> Vec<Coord> {
    match grid.clue_start_cell(number, direction) {
        Ok((row, col)) => run_from(grid, row, col, direction),
        Err(_) => Vec::new(),
    }
}

/// Clue number of the `direction` word covering (`row`, `col`).
///
/// Walks backward through open cells to the start of the run; the run's
/// start cell names the word if it is numbered and the run has at least two
/// letters. Interior cells numbered for the crossing direction do not count.
pub fn resolve_active_clue(grid: &Grid, row: usize, col: usize, direction: Direction) -> Option<u16> {
    if !grid.is_open(row, col) {
        return None;
    }
    let (mut r, mut c) = (row, col);
    while !grid.starts_run(r, c, direction) {
        match direction {
            Direction::Across => c -= 1,
            Direction::Down => r -= 1,
        }
    }
    if grid.run_length(r, c, direction) < 2 {
        return None;
    }
    grid.get(r, c).and_then(|cell| cell.number())
}

fn run_from(grid: &Grid, row: usize, col: usize, direction: Direction) -> Vec<Coord> {
    let len = grid.run_length(row, col, direction);
    (0..len)
        .map(|i| match direction {
            Direction::Across => (row, col + i),
            Direction::Down => (row + i, col),
        })
        .collect()
}

// Wrap target: first open cell of the traversal order for `direction`, so that
// repeated forward moves cycle through every open cell. In Down mode this is
// column-major, unlike a plain row-major wrap to the grid origin; the two only
// differ when the top-left cell is blocked.
fn first_open_in(grid: &Grid, direction: Direction) -> Option<Coord> {
    match direction {
        Direction::Across => grid.first_open_cell(),
        Direction::Down => (0..grid.cols())
            .flat_map(|c| (0..grid.rows()).map(move |r| (r, c)))
            .find(|&(r, c)| grid.is_open(r, c)),
    }
}
