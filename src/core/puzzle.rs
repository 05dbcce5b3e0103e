//! A playable puzzle: grid, clue set and difficulty tier, validated at load time.

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;

use crate::core::common::{Direction, LayoutError};
use crate::core::grid::Grid;
use crate::core::scoring::Difficulty;

/// A numbered prompt for the word starting at the cell with the same number.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Clue {
    pub number: u16,
    pub direction: Direction,
    pub text: String,
}

impl Clue {
    pub fn new(number: u16, direction: Direction, text: impl Into<String>) -> Self {
        Self {
            number,
            direction,
            text: text.into(),
        }
    }

    pub fn across(number: u16, text: impl Into<String>) -> Self {
        Self::new(number, Direction::Across, text)
    }

    pub fn down(number: u16, text: impl Into<String>) -> Self {
        Self::new(number, Direction::Down, text)
    }
}

/// Grid plus clues for one playthrough.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Puzzle {
    id: String,
    difficulty: Difficulty,
    grid: Grid,
    clues: Vec<Clue>,
}

impl Puzzle {
    /// Build and validate a puzzle. Clues are kept sorted by direction, then number.
    pub fn new(
        id: impl Into<String>,
        difficulty: Difficulty,
        grid: Grid,
        mut clues: Vec<Clue>,
    ) -> Result<Self, LayoutError> {
        clues.sort_by_key(|c| (c.direction, c.number));
        let puzzle = Self {
            id: id.into(),
            difficulty,
            grid,
            clues,
        };
        puzzle.validate()?;
        Ok(puzzle)
    }

    /// Check the clue set against the grid's words.
    ///
    /// Every numbered word start needs exactly one clue in its direction, and
    /// every clue must point at such a word.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.grid.open_count() == 0 {
            return Err(LayoutError::NoOpenCells);
        }
        for (i, clue) in self.clues.iter().enumerate() {
            let dup = self.clues[..i]
                .iter()
                .any(|c| c.number == clue.number && c.direction == clue.direction);
            if dup {
                return Err(LayoutError::DuplicateClue {
                    number: clue.number,
                    direction: clue.direction,
                });
            }
            match self.grid.clue_start_cell(clue.number, clue.direction) {
                Ok((r, c)) if self.grid.run_length(r, c, clue.direction) >= 2 => {}
                _ => {
                    return Err(LayoutError::OrphanClue {
                        number: clue.number,
                        direction: clue.direction,
                    })
                }
            }
        }
        for ((r, c), number) in self.grid.numbered_cells() {
            for direction in [Direction::Across, Direction::Down] {
                if self.grid.starts_word(r, c, direction) && self.clue(number, direction).is_none() {
                    return Err(LayoutError::MissingClue { number, direction });
                }
            }
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    /// Clues of one direction, in number order.
    pub fn clues_in(&self, direction: Direction) -> impl Iterator<Item = &Clue> + '_ {
        self.clues.iter().filter(move |c| c.direction == direction)
    }

    pub fn clue(&self, number: u16, direction: Direction) -> Option<&Clue> {
        self.clues
            .iter()
            .find(|c| c.number == number && c.direction == direction)
    }

    /// Same puzzle scored at another difficulty tier.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// The built-in 4×4 starter puzzle.
    pub fn sample() -> Result<Self, LayoutError> {
        let grid = Grid::from_layout(&["CASA", "OSO#", "SOL#", "A###"])?;
        let clues = vec![
            Clue::across(1, "Lugar donde vives"),
            Clue::across(4, "Animal grande y peludo"),
            Clue::across(5, "Estrella que nos da luz"),
            Clue::down(1, "Objeto o elemento que existe"),
            Clue::down(2, "Del verbo asar: yo ..."),
            Clue::down(3, "Astro rey"),
        ];
        Puzzle::new("sample".to_string(), Difficulty::Easy, grid, clues)
    }
}
