//! One playthrough: puzzle, cursor and hint budget behind a single owner.
//!
//! Every player action enters through [`GameSession::apply`] (strict) or
//! [`GameSession::handle`] (recovering) and is processed to completion before
//! the next one. Letter entry and hint reveals share one mutation path, which
//! is also the only place completion is re-evaluated.

use alloc::vec::Vec;

use crate::core::common::{Coord, Direction, LayoutError, PuzzleError};
use crate::core::config::DELETE_KEY;
use crate::core::cursor::Cursor;
use crate::core::hint::HintBudget;
use crate::core::navigation::word_cells;
use crate::core::puzzle::{Clue, Puzzle};
use crate::core::scoring::{self, check_letter, Difficulty, GameStats};

/// A key of the on-screen keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyToken {
    Letter(char),
    Delete,
}

impl KeyToken {
    /// Classify a key press: [`DELETE_KEY`] erases, alphabetic characters type.
    pub fn from_char(ch: char) -> Result<Self, PuzzleError> {
        match ch {
            DELETE_KEY => Ok(KeyToken::Delete),
            ch if ch.is_alphabetic() => Ok(KeyToken::Letter(ch)),
            other => Err(PuzzleError::InvalidKey(other)),
        }
    }
}

/// Player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    CellPress { row: usize, col: usize },
    CluePress { number: u16, direction: Direction },
    Key(KeyToken),
    Hint,
}

/// Result reported when a mutation solves the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Completion {
    pub difficulty: Difficulty,
    pub score: u32,
    pub error_count: u32,
    pub stats: GameStats,
}

/// What an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing changed.
    Ignored,
    /// Cursor moved or changed direction.
    Moved,
    /// A letter was typed; `correct` tells whether it matches the solution.
    Filled { letter: char, correct: bool },
    /// A letter was revealed by a hint.
    Revealed(char),
    /// The cell under the cursor was cleared.
    Erased,
    /// The hint budget is spent; nothing changed.
    HintDenied,
    /// The last mutation solved the puzzle.
    Solved(Completion),
}

/// Per-cell rendering data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub display_value: Option<char>,
    pub clue_number: Option<u16>,
    pub is_blocked: bool,
    pub is_selected: bool,
    /// Every open cell on the cursor's row (across) or column (down).
    pub is_active_word_member: bool,
}

/// Serializable copy of a session for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionSnapshot {
    pub puzzle: Puzzle,
    pub cursor: Cursor,
    pub hints_used: u32,
    pub started_at_ms: u64,
    pub error_count: u32,
    pub completed_at_ms: Option<u64>,
}

/// Aggregate owning the puzzle, cursor and hint budget of one playthrough.
#[derive(Debug, Clone)]
pub struct GameSession {
    puzzle: Puzzle,
    cursor: Cursor,
    hints: HintBudget,
    started_at_ms: u64,
    error_count: u32,
    completed_at_ms: Option<u64>,
}

impl GameSession {
    /// Start playing `puzzle` at `now_ms`.
    pub fn new(puzzle: Puzzle, now_ms: u64) -> Self {
        let mut session = Self {
            cursor: Cursor::home(puzzle.grid()),
            puzzle,
            hints: HintBudget::new(),
            started_at_ms: now_ms,
            error_count: 0,
            completed_at_ms: None,
        };
        session.new_game(now_ms);
        session
    }

    /// Restart the same puzzle: empty grid, cursor home, full hint budget.
    pub fn new_game(&mut self, now_ms: u64) {
        self.puzzle.grid_mut().clear_values();
        self.cursor = Cursor::home(self.puzzle.grid());
        self.hints.reset();
        self.started_at_ms = now_ms;
        self.error_count = 0;
        self.completed_at_ms = None;
    }

    /// Rebuild a session from saved state, re-validating the puzzle.
    ///
    /// A cursor that no longer addresses an open cell is sent home.
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Result<Self, LayoutError> {
        snapshot.puzzle.validate()?;
        let grid = snapshot.puzzle.grid();
        let cursor = if snapshot.cursor.is_valid_for(grid) {
            Cursor::at(
                grid,
                snapshot.cursor.row(),
                snapshot.cursor.col(),
                snapshot.cursor.direction(),
            )
        } else {
            log::warn!("saved cursor is not on an open cell; resetting");
            Cursor::home(grid)
        };
        Ok(Self {
            cursor,
            hints: HintBudget::with_used(snapshot.hints_used),
            started_at_ms: snapshot.started_at_ms,
            error_count: snapshot.error_count,
            completed_at_ms: snapshot.completed_at_ms,
            puzzle: snapshot.puzzle,
        })
    }

    /// Point-in-time copy for the persistence layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            puzzle: self.puzzle.clone(),
            cursor: self.cursor,
            hints_used: self.hints.used(),
            started_at_ms: self.started_at_ms,
            error_count: self.error_count,
            completed_at_ms: self.completed_at_ms,
        }
    }

    /// Apply an event, reporting every failure to the caller.
    pub fn apply(&mut self, event: Event, now_ms: u64) -> Result<Outcome, PuzzleError> {
        match event {
            Event::CellPress { row, col } => {
                let moved = self.cursor.press_cell(self.puzzle.grid(), row, col)?;
                Ok(if moved { Outcome::Moved } else { Outcome::Ignored })
            }
            Event::CluePress { number, direction } => {
                if self.puzzle.clue(number, direction).is_none() {
                    return Err(PuzzleError::ClueNotFound { number, direction });
                }
                self.cursor.select_clue(self.puzzle.grid(), number, direction)?;
                Ok(Outcome::Moved)
            }
            Event::Key(KeyToken::Letter(letter)) => self.enter(letter, false, now_ms),
            Event::Key(KeyToken::Delete) => {
                self.cursor.backspace(self.puzzle.grid_mut())?;
                Ok(Outcome::Erased)
            }
            Event::Hint => {
                let (row, col) = self.cursor.position();
                let cell = *self.puzzle.grid().cell_at(row, col)?;
                let solution = self.hints.request(&cell, row, col)?;
                self.enter(solution, true, now_ms)
            }
        }
    }

    /// Apply an event, recovering locally from expected failures.
    ///
    /// Blocked cells and unknown clues are ignored, an exhausted hint budget
    /// becomes [`Outcome::HintDenied`], and out-of-range coordinates (which a
    /// rendered board never produces) assert in debug builds.
    pub fn handle(&mut self, event: Event, now_ms: u64) -> Outcome {
        match self.apply(event, now_ms) {
            Ok(outcome) => outcome,
            Err(PuzzleError::BudgetExhausted) => Outcome::HintDenied,
            Err(err @ PuzzleError::OutOfBounds { .. }) => {
                debug_assert!(false, "{}", err);
                Outcome::Ignored
            }
            Err(err) => {
                log::debug!("ignored {:?}: {}", event, err);
                Outcome::Ignored
            }
        }
    }

    // Shared by typed letters and hint reveals.
    fn enter(&mut self, letter: char, revealed: bool, now_ms: u64) -> Result<Outcome, PuzzleError> {
        let (row, col) = self.cursor.position();
        let correct = check_letter(self.puzzle.grid(), row, col, letter);
        self.cursor.enter_letter(self.puzzle.grid_mut(), letter)?;
        if !correct {
            self.error_count += 1;
        }
        if self.completed_at_ms.is_none() && scoring::is_complete(self.puzzle.grid()) {
            self.completed_at_ms = Some(now_ms);
            let completion = self.completion(now_ms);
            log::info!(
                "puzzle {} solved: score {} in {}s",
                self.puzzle.id(),
                completion.score,
                completion.stats.time_elapsed_secs
            );
            return Ok(Outcome::Solved(completion));
        }
        let stored = self
            .puzzle
            .grid()
            .get(row, col)
            .and_then(|cell| cell.value())
            .unwrap_or(letter);
        Ok(if revealed {
            Outcome::Revealed(stored)
        } else {
            Outcome::Filled {
                letter: stored,
                correct,
            }
        })
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn hints(&self) -> &HintBudget {
        &self.hints
    }

    pub fn started_at_ms(&self) -> u64 {
        self.started_at_ms
    }

    /// Wrong letters typed so far; hints never count.
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn is_complete(&self) -> bool {
        scoring::is_complete(self.puzzle.grid())
    }

    /// Time of the first completion, if the puzzle has been solved.
    pub fn completed_at_ms(&self) -> Option<u64> {
        self.completed_at_ms
    }

    /// Statistics at `now_ms`; the clock stops once the puzzle is solved.
    pub fn stats(&self, now_ms: u64) -> GameStats {
        let until = self.completed_at_ms.unwrap_or(now_ms);
        scoring::stats(self.puzzle.grid(), self.started_at_ms, until, self.hints.used())
    }

    /// Score and statistics as they stand at `now_ms`.
    pub fn completion(&self, now_ms: u64) -> Completion {
        let stats = self.stats(now_ms);
        let difficulty = self.puzzle.difficulty();
        Completion {
            difficulty,
            score: scoring::score(
                stats.time_elapsed_secs,
                difficulty,
                self.error_count,
                stats.hints_used,
            ),
            error_count: self.error_count,
            stats,
        }
    }

    /// Clue under the cursor in the current direction.
    pub fn active_clue(&self) -> Option<&Clue> {
        self.cursor
            .active_clue()
            .and_then(|n| self.puzzle.clue(n, self.cursor.direction()))
    }

    /// Cells of the active clue's word.
    pub fn active_word(&self) -> Vec<Coord> {
        self.cursor
            .active_clue()
            .map(|n| word_cells(self.puzzle.grid(), n, self.cursor.direction()))
            .unwrap_or_default()
    }

    /// Whether every cell of a clue's word is filled correctly.
    pub fn is_clue_solved(&self, number: u16, direction: Direction) -> bool {
        let cells = word_cells(self.puzzle.grid(), number, direction);
        !cells.is_empty() && scoring::validate_word(self.puzzle.grid(), &cells)
    }

    /// Rendering data for one cell; `None` outside the grid.
    pub fn cell_view(&self, row: usize, col: usize) -> Option<CellView> {
        let cell = self.puzzle.grid().get(row, col)?;
        let (cur_row, cur_col) = self.cursor.position();
        let on_line = match self.cursor.direction() {
            Direction::Across => row == cur_row,
            Direction::Down => col == cur_col,
        };
        Some(CellView {
            display_value: cell.value(),
            clue_number: cell.number(),
            is_blocked: cell.is_blocked(),
            is_selected: (row, col) == (cur_row, cur_col),
            is_active_word_member: on_line && cell.is_open(),
        })
    }

    /// Rendering data for the whole board, row by row.
    pub fn cell_views(&self) -> Vec<Vec<CellView>> {
        let grid = self.puzzle.grid();
        (0..grid.rows())
            .map(|r| {
                (0..grid.cols())
                    .filter_map(|c| self.cell_view(r, c))
                    .collect()
            })
            .collect()
    }
}
