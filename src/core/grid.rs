//! Puzzle grid: blocked and open cells, numbering and the single mutation path.

use alloc::vec::Vec;

use crate::core::common::{Coord, Direction, LayoutError, PuzzleError};

/// Layout character for a blocked cell in [`Grid::from_layout`].
pub const BLOCK: char = '#';

/// One square of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Not part of any word; cannot receive input.
    Blocked,
    /// A letter square.
    Open {
        value: Option<char>,
        solution: char,
        number: Option<u16>,
    },
}

impl Cell {
    /// Empty open cell with the given solution.
    pub fn open(solution: char) -> Self {
        Cell::Open {
            value: None,
            solution: uppercase(solution).unwrap_or(solution),
            number: None,
        }
    }

    /// Empty open cell that carries a clue number.
    pub fn numbered(solution: char, number: u16) -> Self {
        Cell::Open {
            value: None,
            solution: uppercase(solution).unwrap_or(solution),
            number: Some(number),
        }
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, Cell::Blocked)
    }

    pub fn is_open(&self) -> bool {
        !self.is_blocked()
    }

    /// Letter currently entered, if any.
    pub fn value(&self) -> Option<char> {
        match self {
            Cell::Open { value, .. } => *value,
            Cell::Blocked => None,
        }
    }

    pub fn solution(&self) -> Option<char> {
        match self {
            Cell::Open { solution, .. } => Some(*solution),
            Cell::Blocked => None,
        }
    }

    pub fn number(&self) -> Option<u16> {
        match self {
            Cell::Open { number, .. } => *number,
            Cell::Blocked => None,
        }
    }

    /// Open cell holding some letter.
    pub fn is_filled(&self) -> bool {
        self.value().is_some()
    }

    /// Open cell whose letter matches the solution, ignoring case.
    pub fn is_correct(&self) -> bool {
        match self {
            Cell::Open {
                value: Some(v),
                solution,
                ..
            } => same_letter(*v, *solution),
            _ => false,
        }
    }
}

/// Uppercase a letter when it maps to exactly one uppercase character.
pub(crate) fn uppercase(ch: char) -> Option<char> {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}

/// Case-insensitive letter comparison.
pub(crate) fn same_letter(a: char, b: char) -> bool {
    a == b || uppercase(a).is_some_and(|ua| Some(ua) == uppercase(b))
}

/// Rectangular crossword grid stored row-major.
///
/// The shape and the solutions are fixed once built; only the entered values
/// change during play.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "std",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawGrid")
)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

/// Grid as stored on disk, checked by [`Grid::from_cells`] before use.
#[cfg(feature = "std")]
#[derive(serde::Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

#[cfg(feature = "std")]
impl TryFrom<RawGrid> for Grid {
    type Error = LayoutError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        if raw.rows == 0 || raw.cols == 0 {
            return Err(LayoutError::Empty);
        }
        let expected = raw.rows.checked_mul(raw.cols).unwrap_or(usize::MAX);
        if raw.cells.len() != expected {
            return Err(LayoutError::CellCount {
                expected,
                found: raw.cells.len(),
            });
        }
        let rows = raw.cells.chunks(raw.cols).map(<[Cell]>::to_vec).collect();
        Grid::from_cells(rows)
    }
}

impl Grid {
    /// Build a grid from explicit cells, checking shape, solutions and numbering.
    pub fn from_cells(rows: Vec<Vec<Cell>>) -> Result<Self, LayoutError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(LayoutError::Empty);
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(height * cols);
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(LayoutError::Ragged {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            for (c, cell) in row.into_iter().enumerate() {
                cells.push(normalize(cell, r, c)?);
            }
        }
        let grid = Grid {
            rows: height,
            cols,
            cells,
        };
        grid.check_numbers()?;
        Ok(grid)
    }

    /// Parse rows of solution letters, `#` marking blocked cells, and number
    /// every cell that starts an across or down word of two or more letters.
    pub fn from_layout(layout: &[&str]) -> Result<Self, LayoutError> {
        let rows = layout
            .iter()
            .enumerate()
            .map(|(r, line)| {
                line.chars()
                    .enumerate()
                    .map(|(c, ch)| match ch {
                        BLOCK => Ok(Cell::Blocked),
                        ch if ch.is_alphabetic() => Ok(Cell::open(ch)),
                        _ => Err(LayoutError::InvalidSolution { row: r, col: c }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut grid = Grid::from_cells(rows)?;
        grid.assign_numbers();
        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at (`row`, `col`), or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Cell at (`row`, `col`); blocked cells are returned as [`Cell::Blocked`].
    pub fn cell_at(&self, row: usize, col: usize) -> Result<&Cell, PuzzleError> {
        self.get(row, col)
            .ok_or(PuzzleError::OutOfBounds { row, col })
    }

    /// `true` for an addressable cell; `false` when blocked or outside the grid.
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_open)
    }

    /// Write an uppercased letter into an open cell.
    pub fn set_value(&mut self, row: usize, col: usize, ch: char) -> Result<(), PuzzleError> {
        let letter = uppercase(ch)
            .filter(|u| u.is_alphabetic())
            .ok_or(PuzzleError::InvalidKey(ch))?;
        self.write(row, col, Some(letter))
    }

    /// Erase the letter of an open cell.
    pub fn clear_value(&mut self, row: usize, col: usize) -> Result<(), PuzzleError> {
        self.write(row, col, None)
    }

    fn write(&mut self, row: usize, col: usize, letter: Option<char>) -> Result<(), PuzzleError> {
        if row >= self.rows || col >= self.cols {
            return Err(PuzzleError::OutOfBounds { row, col });
        }
        match &mut self.cells[row * self.cols + col] {
            Cell::Open { value, .. } => {
                *value = letter;
                Ok(())
            }
            Cell::Blocked => Err(PuzzleError::BlockedCellWrite { row, col }),
        }
    }

    /// Erase every entered letter.
    pub fn clear_values(&mut self) {
        for cell in &mut self.cells {
            if let Cell::Open { value, .. } = cell {
                *value = None;
            }
        }
    }

    /// First cell, in row-major order, carrying `number` and starting a run in `direction`.
    pub fn clue_start_cell(&self, number: u16, direction: Direction) -> Result<Coord, PuzzleError> {
        self.open_cells()
            .find(|&(r, c)| {
                self.cells[r * self.cols + c].number() == Some(number)
                    && self.starts_run(r, c, direction)
            })
            .ok_or(PuzzleError::ClueNotFound { number, direction })
    }

    /// Open cell whose predecessor in `direction` is blocked or off the grid.
    pub fn starts_run(&self, row: usize, col: usize, direction: Direction) -> bool {
        if !self.is_open(row, col) {
            return false;
        }
        match direction {
            Direction::Across => col == 0 || !self.is_open(row, col - 1),
            Direction::Down => row == 0 || !self.is_open(row - 1, col),
        }
    }

    /// Number of consecutive open cells from (`row`, `col`) onwards in `direction`.
    pub fn run_length(&self, row: usize, col: usize, direction: Direction) -> usize {
        let mut len = 0;
        let (mut r, mut c) = (row, col);
        while self.is_open(r, c) {
            len += 1;
            match direction {
                Direction::Across => c += 1,
                Direction::Down => r += 1,
            }
        }
        len
    }

    /// Starting cell of a numbered word: run start with at least two letters.
    pub fn starts_word(&self, row: usize, col: usize, direction: Direction) -> bool {
        self.starts_run(row, col, direction) && self.run_length(row, col, direction) >= 2
    }

    /// Open cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_open())
            .map(move |(i, _)| (i / self.cols, i % self.cols))
    }

    /// All cells in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / self.cols, i % self.cols), cell))
    }

    pub fn first_open_cell(&self) -> Option<Coord> {
        self.open_cells().next()
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_open()).count()
    }

    /// Numbered cells in row-major order.
    pub fn numbered_cells(&self) -> impl Iterator<Item = (Coord, u16)> + '_ {
        self.iter()
            .filter_map(|(pos, cell)| cell.number().map(|n| (pos, n)))
    }

    fn assign_numbers(&mut self) {
        let mut next = 1u16;
        for i in 0..self.cells.len() {
            let (r, c) = (i / self.cols, i % self.cols);
            let starts =
                self.starts_word(r, c, Direction::Across) || self.starts_word(r, c, Direction::Down);
            if let Cell::Open { number, .. } = &mut self.cells[i] {
                *number = if starts {
                    next += 1;
                    Some(next - 1)
                } else {
                    None
                };
            }
        }
    }

    fn check_numbers(&self) -> Result<(), LayoutError> {
        let mut seen: Vec<u16> = Vec::new();
        for ((row, col), number) in self.numbered_cells() {
            if number == 0 {
                return Err(LayoutError::ZeroNumber { row, col });
            }
            if !self.starts_run(row, col, Direction::Across)
                && !self.starts_run(row, col, Direction::Down)
            {
                return Err(LayoutError::NumberOnNonStart { row, col, number });
            }
            if seen.contains(&number) {
                return Err(LayoutError::DuplicateNumber(number));
            }
            seen.push(number);
        }
        Ok(())
    }
}

fn normalize(cell: Cell, row: usize, col: usize) -> Result<Cell, LayoutError> {
    match cell {
        Cell::Blocked => Ok(Cell::Blocked),
        Cell::Open {
            value,
            solution,
            number,
        } => {
            let solution = uppercase(solution)
                .filter(|s| s.is_alphabetic())
                .ok_or(LayoutError::InvalidSolution { row, col })?;
            Ok(Cell::Open {
                value: value.and_then(uppercase),
                solution,
                number,
            })
        }
    }
}
