//! Common types for the crossword core: directions, coordinates and errors.

use core::fmt;

/// A grid position: (row, column).
pub type Coord = (usize, usize);

/// Fill direction of a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// The other direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }

    /// Lowercase label, also used as the suffix letter in clue references (`1a`, `2d`).
    pub fn label(self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised while playing a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleError {
    /// Row or column lies outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Attempted to write into a blocked cell.
    BlockedCellWrite { row: usize, col: usize },
    /// The puzzle has no clue with this number in this direction.
    ClueNotFound { number: u16, direction: Direction },
    /// Every hint of the session has been spent.
    BudgetExhausted,
    /// Key token is neither a letter nor the delete key.
    InvalidKey(char),
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PuzzleError::OutOfBounds { row, col } => {
                write!(f, "Cell ({}, {}) is outside the grid", row, col)
            }
            PuzzleError::BlockedCellWrite { row, col } => {
                write!(f, "Cell ({}, {}) is blocked", row, col)
            }
            PuzzleError::ClueNotFound { number, direction } => {
                write!(f, "No {} clue numbered {}", direction, number)
            }
            PuzzleError::BudgetExhausted => write!(f, "No hints left"),
            PuzzleError::InvalidKey(ch) => write!(f, "Invalid key {:?}", ch),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PuzzleError {}

/// Reasons a puzzle definition is rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Grid has no rows or no columns.
    Empty,
    /// Stored cell count does not match the declared dimensions.
    CellCount { expected: usize, found: usize },
    /// A row's length differs from the first row's.
    Ragged { row: usize, expected: usize, found: usize },
    /// Solution is not a single alphabetic character.
    InvalidSolution { row: usize, col: usize },
    /// Clue numbers start at 1.
    ZeroNumber { row: usize, col: usize },
    /// A numbered cell does not begin any run.
    NumberOnNonStart { row: usize, col: usize, number: u16 },
    /// Two cells carry the same number.
    DuplicateNumber(u16),
    /// A numbered cell begins a word that has no clue.
    MissingClue { number: u16, direction: Direction },
    /// The same clue appears twice.
    DuplicateClue { number: u16, direction: Direction },
    /// A clue does not match any word in the grid.
    OrphanClue { number: u16, direction: Direction },
    /// The grid contains no open cell.
    NoOpenCells,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::Empty => write!(f, "Puzzle grid is empty"),
            LayoutError::CellCount { expected, found } => {
                write!(f, "Grid stores {} cells, expected {}", found, expected)
            }
            LayoutError::Ragged { row, expected, found } => write!(
                f,
                "Row {} has {} cells, expected {}",
                row, found, expected
            ),
            LayoutError::InvalidSolution { row, col } => {
                write!(f, "Cell ({}, {}) has an invalid solution", row, col)
            }
            LayoutError::ZeroNumber { row, col } => {
                write!(f, "Cell ({}, {}) is numbered 0", row, col)
            }
            LayoutError::NumberOnNonStart { row, col, number } => write!(
                f,
                "Cell ({}, {}) is numbered {} but does not start a word",
                row, col, number
            ),
            LayoutError::DuplicateNumber(n) => write!(f, "Number {} is used twice", n),
            LayoutError::MissingClue { number, direction } => {
                write!(f, "Missing {} clue for number {}", direction, number)
            }
            LayoutError::DuplicateClue { number, direction } => {
                write!(f, "Duplicate {} clue for number {}", direction, number)
            }
            LayoutError::OrphanClue { number, direction } => {
                write!(f, "{} clue {} matches no word in the grid", direction, number)
            }
            LayoutError::NoOpenCells => write!(f, "Puzzle has no open cells"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LayoutError {}
