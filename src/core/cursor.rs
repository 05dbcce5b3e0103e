//! Cursor position, typing direction and active clue, with their transition rules.
//!
//! The cursor borrows the grid for each transition and never owns it.

use crate::core::common::{Coord, Direction, PuzzleError};
use crate::core::grid::Grid;
use crate::core::navigation::{find_next_cell, find_previous_cell, resolve_active_clue};

/// Current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cursor {
    row: usize,
    col: usize,
    direction: Direction,
    active_clue: Option<u16>,
}

impl Cursor {
    /// Starting position of a new game: the lowest-numbered cell (or the
    /// first open cell of an unnumbered grid), typing across.
    pub fn home(grid: &Grid) -> Self {
        let (row, col) = grid
            .numbered_cells()
            .min_by_key(|&(_, n)| n)
            .map(|(pos, _)| pos)
            .or_else(|| grid.first_open_cell())
            .unwrap_or((0, 0));
        Self::at(grid, row, col, Direction::Across)
    }

    /// Cursor at (`row`, `col`) with the active clue resolved from the grid.
    pub fn at(grid: &Grid, row: usize, col: usize, direction: Direction) -> Self {
        Self {
            row,
            col,
            direction,
            active_clue: resolve_active_clue(grid, row, col, direction),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn position(&self) -> Coord {
        (self.row, self.col)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn active_clue(&self) -> Option<u16> {
        self.active_clue
    }

    /// Jump to the start of a clue's word and type in its direction.
    ///
    /// Leaves the cursor untouched when the clue does not exist.
    pub fn select_clue(
        &mut self,
        grid: &Grid,
        number: u16,
        direction: Direction,
    ) -> Result<(), PuzzleError> {
        let (row, col) = grid.clue_start_cell(number, direction)?;
        *self = Self {
            row,
            col,
            direction,
            active_clue: Some(number),
        };
        Ok(())
    }

    /// React to a tap on (`row`, `col`).
    ///
    /// Tapping the selected cell flips the direction in place; tapping another
    /// open cell moves there keeping the direction. Returns `false` for a
    /// blocked cell, which is ignored.
    pub fn press_cell(&mut self, grid: &Grid, row: usize, col: usize) -> Result<bool, PuzzleError> {
        if grid.cell_at(row, col)?.is_blocked() {
            return Ok(false);
        }
        let direction = if (row, col) == self.position() {
            self.direction.toggled()
        } else {
            self.direction
        };
        *self = Self::at(grid, row, col, direction);
        Ok(true)
    }

    /// Write `letter` at the cursor, then advance to the next open cell.
    pub fn enter_letter(&mut self, grid: &mut Grid, letter: char) -> Result<(), PuzzleError> {
        grid.set_value(self.row, self.col, letter)?;
        self.advance(grid);
        Ok(())
    }

    /// Erase the cell under the cursor; on an already empty cell, step back
    /// along the line first.
    ///
    /// The erased cell is always the one selected when the key was pressed,
    /// never the cell the cursor steps back to.
    pub fn backspace(&mut self, grid: &mut Grid) -> Result<(), PuzzleError> {
        let (row, col) = self.position();
        let was_empty = grid.cell_at(row, col)?.value().is_none();
        grid.clear_value(row, col)?;
        if was_empty {
            self.retreat(grid);
        }
        Ok(())
    }

    /// Move to the next open cell, wrapping around the grid.
    pub fn advance(&mut self, grid: &Grid) {
        let (row, col) = find_next_cell(grid, self.row, self.col, self.direction);
        *self = Self::at(grid, row, col, self.direction);
    }

    /// Move to the previous open cell of the current line, if any.
    pub fn retreat(&mut self, grid: &Grid) {
        let (row, col) = find_previous_cell(grid, self.row, self.col, self.direction);
        *self = Self::at(grid, row, col, self.direction);
    }

    /// `true` when the cursor sits on an open cell of `grid`.
    pub fn is_valid_for(&self, grid: &Grid) -> bool {
        grid.is_open(self.row, self.col)
    }
}
