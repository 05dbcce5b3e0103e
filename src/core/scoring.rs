//! Win detection, progress statistics and the score formula.
//!
//! Everything here is a pure function of the snapshot it is handed.

use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::core::common::Coord;
use crate::core::config::{ERROR_PENALTY, HINT_PENALTY, MIN_TIME_FACTOR, REFERENCE_WINDOW_SECS};
use crate::core::grid::{same_letter, Grid};

/// Difficulty tier of a puzzle; sets the base points of the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize, clap::ValueEnum))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Points awarded before time, error and hint adjustments.
    pub fn base_points(self) -> u32 {
        match self {
            Difficulty::Easy => 100,
            Difficulty::Medium => 200,
            Difficulty::Hard => 300,
            Difficulty::Expert => 500,
        }
    }

    /// Player-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "fácil",
            Difficulty::Medium => "medio",
            Difficulty::Hard => "difícil",
            Difficulty::Expert => "experto",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress figures derived from a grid, a start time and the hint count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameStats {
    pub progress_pct: u32,
    pub accuracy_pct: u32,
    pub time_elapsed_secs: u64,
    pub hints_used: u32,
    pub total_open_cells: usize,
    pub filled_cells: usize,
    pub correct_cells: usize,
}

/// `true` iff every open cell holds its solution letter, ignoring case.
pub fn is_complete(grid: &Grid) -> bool {
    grid.iter()
        .all(|(_, cell)| cell.is_blocked() || cell.is_correct())
}

/// Whether `letter` is the solution of (`row`, `col`). Blocked or missing cells never match.
pub fn check_letter(grid: &Grid, row: usize, col: usize, letter: char) -> bool {
    grid.get(row, col)
        .and_then(|cell| cell.solution())
        .is_some_and(|solution| same_letter(letter, solution))
}

/// `true` when every listed cell is open, filled and correct.
pub fn validate_word(grid: &Grid, cells: &[Coord]) -> bool {
    cells
        .iter()
        .all(|&(r, c)| grid.get(r, c).is_some_and(|cell| cell.is_correct()))
}

/// Compute statistics at `now_ms` for a game started at `started_at_ms`.
///
/// Percentages are floored; accuracy is 0 while nothing is filled.
pub fn stats(grid: &Grid, started_at_ms: u64, now_ms: u64, hints_used: u32) -> GameStats {
    let (mut total, mut filled, mut correct) = (0usize, 0usize, 0usize);
    for (_, cell) in grid.iter().filter(|(_, cell)| cell.is_open()) {
        total += 1;
        if cell.is_filled() {
            filled += 1;
        }
        if cell.is_correct() {
            correct += 1;
        }
    }
    GameStats {
        progress_pct: percent(filled, total),
        accuracy_pct: percent(correct, filled),
        time_elapsed_secs: now_ms.saturating_sub(started_at_ms) / 1000,
        hints_used,
        total_open_cells: total,
        filled_cells: filled,
        correct_cells: correct,
    }
}

fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        0
    } else {
        (part * 100 / whole) as u32
    }
}

/// Final score of a solved puzzle.
///
/// `floor(base * max(0.1, 1 - t/900)) - 10 * errors - 20 * hints`, never below zero.
pub fn score(time_elapsed_secs: u64, difficulty: Difficulty, error_count: u32, hints_used: u32) -> u32 {
    let time_factor =
        (1.0 - time_elapsed_secs as f64 / REFERENCE_WINDOW_SECS as f64).max(MIN_TIME_FACTOR);
    let timed = libm::floor(difficulty.base_points() as f64 * time_factor) as i64;
    let raw = timed - ERROR_PENALTY * error_count as i64 - HINT_PENALTY * hints_used as i64;
    raw.max(0) as u32
}

/// Length prompt shown when a player is stuck on a word.
pub fn suggest_word(length: usize) -> String {
    format!("This clue has {} letters.", length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_formula() {
        assert_eq!(score(0, Difficulty::Easy, 0, 0), 100);
        assert_eq!(score(450, Difficulty::Medium, 0, 0), 100);
        assert_eq!(score(450, Difficulty::Medium, 2, 1), 60);
        // floor at 10% of base
        assert_eq!(score(10_000, Difficulty::Expert, 0, 0), 50);
        assert_eq!(score(10_000, Difficulty::Easy, 3, 2), 0);
    }

    #[test]
    fn stats_avoid_division_by_zero() {
        let grid = Grid::from_layout(&["AB"]).unwrap();
        let s = stats(&grid, 1_000, 3_999, 0);
        assert_eq!(s.accuracy_pct, 0);
        assert_eq!(s.progress_pct, 0);
        assert_eq!(s.time_elapsed_secs, 2);
        assert_eq!(s.total_open_cells, 2);
    }

    #[test]
    fn stats_count_filled_and_correct() {
        let mut grid = Grid::from_layout(&["ABC", "#DE"]).unwrap();
        grid.set_value(0, 0, 'a').unwrap();
        grid.set_value(0, 1, 'x').unwrap();
        grid.set_value(1, 2, 'e').unwrap();
        let s = stats(&grid, 0, 0, 1);
        assert_eq!(s.filled_cells, 3);
        assert_eq!(s.correct_cells, 2);
        assert_eq!(s.progress_pct, 60);
        assert_eq!(s.accuracy_pct, 66);
        assert_eq!(s.hints_used, 1);
    }

    #[test]
    fn letter_checks() {
        let grid = Grid::from_layout(&["A#"]).unwrap();
        assert!(check_letter(&grid, 0, 0, 'a'));
        assert!(!check_letter(&grid, 0, 0, 'b'));
        assert!(!check_letter(&grid, 0, 1, 'a'));
        assert!(!check_letter(&grid, 5, 5, 'a'));
    }
}
