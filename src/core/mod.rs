//! Core crossword engine (no_std compatible)
//!
//! Puzzle model, navigation, cursor state machine, scoring and hints. Only
//! `alloc`, `libm` and the `log` facade are needed, so the engine can run
//! wherever a UI shell can feed it events.

pub mod common;
pub mod config;
pub mod cursor;
pub mod grid;
pub mod hint;
pub mod navigation;
pub mod puzzle;
pub mod scoring;
pub mod session;

// Re-export commonly used types
pub use common::{Coord, Direction, LayoutError, PuzzleError};
pub use config::*;
pub use cursor::Cursor;
pub use grid::{Cell, Grid, BLOCK};
pub use hint::HintBudget;
pub use navigation::{find_next_cell, find_previous_cell, resolve_active_clue, word_cells};
pub use puzzle::{Clue, Puzzle};
pub use scoring::{
    check_letter, is_complete, score, stats, suggest_word, validate_word, Difficulty, GameStats,
};
pub use session::{
    CellView, Completion, Event, GameSession, KeyToken, Outcome, SessionSnapshot,
};
