#![cfg(feature = "std")]

use std::fmt::Write as _;
use std::string::String;

use crate::core::{CellView, Direction, GameSession, GameStats};
use crate::domain::HighScoreEntry;

/// Board as text: `[X]` is the cursor, `(X)` the active line, `·` an empty
/// cell and `███` a blocked one. Clue numbers are listed beside each row.
pub fn board_to_string(views: &[Vec<CellView>]) -> String {
    let cols = views.first().map(|r| r.len()).unwrap_or(0);
    let mut out = String::new();
    let _ = write!(out, "     ");
    for c in 0..cols {
        let _ = write!(out, "{:^3}", c + 1);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "    ╔{}╗", "═".repeat(cols * 3));
    for (r, row) in views.iter().enumerate() {
        let _ = write!(out, " {:2} ║", r + 1);
        for view in row {
            let _ = write!(out, "{}", cell_to_string(view));
        }
        let _ = write!(out, "║");
        let numbers: Vec<String> = row
            .iter()
            .filter_map(|v| v.clue_number)
            .map(|n| n.to_string())
            .collect();
        if !numbers.is_empty() {
            let _ = write!(out, "  {}", numbers.join(" "));
        }
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "    ╚{}╝", "═".repeat(cols * 3));
    out
}

fn cell_to_string(view: &CellView) -> String {
    if view.is_blocked {
        return "███".to_string();
    }
    let ch = view.display_value.unwrap_or('·');
    if view.is_selected {
        format!("[{}]", ch)
    } else if view.is_active_word_member {
        format!("({})", ch)
    } else {
        format!(" {} ", ch)
    }
}

/// Clue list by direction; solved clues are ticked and the active one marked.
pub fn clues_to_string(session: &GameSession) -> String {
    let mut out = String::new();
    let active = session.active_clue().map(|c| (c.number, c.direction));
    for direction in [Direction::Across, Direction::Down] {
        let _ = writeln!(out, "{}:", direction.label());
        for clue in session.puzzle().clues_in(direction) {
            let marker = if active == Some((clue.number, clue.direction)) {
                '>'
            } else {
                ' '
            };
            let tick = if session.is_clue_solved(clue.number, clue.direction) {
                " ✓"
            } else {
                ""
            };
            let _ = writeln!(out, " {} {:>2}. {}{}", marker, clue.number, clue.text, tick);
        }
    }
    out
}

/// One-line progress summary.
pub fn status_to_string(stats: &GameStats, hints_remaining: u32) -> String {
    format!(
        "Progress {}%  Accuracy {}%  Time {}:{:02}  Hints left {}",
        stats.progress_pct,
        stats.accuracy_pct,
        stats.time_elapsed_secs / 60,
        stats.time_elapsed_secs % 60,
        hints_remaining
    )
}

/// Print board, active clue, status line and clue list.
pub fn print_session(session: &GameSession, now_ms: u64) {
    std::println!("\n{}", board_to_string(&session.cell_views()));
    match session.active_clue() {
        Some(clue) => std::println!(
            "{} {}: {}",
            clue.number,
            clue.direction.label(),
            clue.text
        ),
        None => std::println!("(no clue on this cell in this direction)"),
    }
    std::println!(
        "{}",
        status_to_string(&session.stats(now_ms), session.hints().remaining())
    );
    std::println!("\n{}", clues_to_string(session));
}

/// Print a high-score table, best first.
pub fn print_scores(title: &str, entries: &[HighScoreEntry]) {
    std::println!("{}", title);
    if entries.is_empty() {
        std::println!("  (no scores yet)");
    }
    for (i, entry) in entries.iter().enumerate() {
        std::println!(
            "  {:2}. {:>6}  {:<12} {}",
            i + 1,
            entry.score,
            entry.game_id,
            entry.date.format("%Y-%m-%d %H:%M")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Event, KeyToken, Puzzle};

    #[test]
    fn board_marks_cursor_and_line() {
        let mut session = GameSession::new(Puzzle::sample().unwrap(), 0);
        session.handle(Event::Key(KeyToken::Letter('c')), 0);
        let board = board_to_string(&session.cell_views());
        let first_row = board.lines().nth(2).unwrap();
        assert!(first_row.contains("(C)[·](·)(·)"));
        assert!(first_row.ends_with("1 2 3"));
        assert!(board.contains("███"));
    }

    #[test]
    fn status_line_formats_time() {
        let stats = GameStats {
            progress_pct: 50,
            accuracy_pct: 100,
            time_elapsed_secs: 125,
            hints_used: 0,
            total_open_cells: 4,
            filled_cells: 2,
            correct_cells: 2,
        };
        assert_eq!(
            status_to_string(&stats, 2),
            "Progress 50%  Accuracy 100%  Time 2:05  Hints left 2"
        );
    }
}
