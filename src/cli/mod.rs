//! Terminal front end: line commands and board rendering.
//!
//! Compiled only when the `std` feature is enabled.

#![cfg(feature = "std")]

pub mod render;

pub use render::*;

use std::string::String;
use std::vec::Vec;

use crate::core::{Direction, Event, KeyToken};

/// One line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Events for the session, applied in order.
    Play(Vec<Event>),
    NewGame,
    Help,
    Quit,
}

/// Parse a line typed at the `play` prompt.
///
/// Letters type in sequence, `-` erases, `?` asks for a hint, `r c` presses a
/// cell (1-based), `12a` / `3d` selects a clue and `:new`, `:help`, `:q` are
/// session commands.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let line = input.trim();
    if line.is_empty() {
        return Err("Empty input".to_string());
    }
    if let Some(cmd) = line.strip_prefix(':') {
        return match cmd.trim() {
            "q" | "quit" => Ok(Command::Quit),
            "new" => Ok(Command::NewGame),
            "help" | "h" => Ok(Command::Help),
            other => Err(format!("Unknown command ':{}' - try :help", other)),
        };
    }
    match line {
        "-" => return Ok(Command::Play(vec![Event::Key(KeyToken::Delete)])),
        "?" => return Ok(Command::Play(vec![Event::Hint])),
        _ => {}
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() == 2 {
        return parse_cell(parts[0], parts[1]).map(|event| Command::Play(vec![event]));
    }
    if parts.len() > 2 {
        return Err(format!("Too many values in '{}'", line));
    }

    if line.starts_with(|c: char| c.is_ascii_digit()) {
        return parse_clue(line).map(|event| Command::Play(vec![event]));
    }
    if line.chars().all(char::is_alphabetic) {
        let keys = line.chars().map(|c| Event::Key(KeyToken::Letter(c))).collect();
        return Ok(Command::Play(keys));
    }
    Err(format!("Cannot read '{}' - type :help for the list of commands", line))
}

fn parse_cell(row: &str, col: &str) -> Result<Event, String> {
    let row: usize = row
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number", row))?;
    let col: usize = col
        .parse()
        .map_err(|_| format!("Invalid column '{}' - must be a number", col))?;
    if row == 0 || col == 0 {
        return Err("Rows and columns start at 1".to_string());
    }
    Ok(Event::CellPress {
        row: row - 1,
        col: col - 1,
    })
}

fn parse_clue(input: &str) -> Result<Event, String> {
    let split = input
        .find(|c: char| !c.is_ascii_digit())
        .ok_or_else(|| format!("Missing direction in '{}' - use a or d", input))?;
    let (digits, suffix) = input.split_at(split);
    let number: u16 = digits
        .parse()
        .map_err(|_| format!("Invalid clue number '{}'", digits))?;
    let direction = match suffix.to_ascii_lowercase().as_str() {
        "a" | "across" | "h" => Direction::Across,
        "d" | "down" | "v" => Direction::Down,
        other => return Err(format!("Unknown direction '{}' - use a or d", other)),
    };
    Ok(Event::CluePress { number, direction })
}

/// Command reference shown by `:help`.
pub const HELP: &str = "\
Commands:
  letters   type them from the cursor on (e.g. casa)
  -         erase the selected cell, or step back if it is empty
  ?         reveal the selected cell (limited hints)
  r c       select row r, column c; again on the same cell flips direction
  1a / 2d   jump to clue 1 across / 2 down
  :new      restart this puzzle
  :help     show this list
  :q        save and quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_become_key_events() {
        assert_eq!(
            parse_command("ca"),
            Ok(Command::Play(vec![
                Event::Key(KeyToken::Letter('c')),
                Event::Key(KeyToken::Letter('a')),
            ]))
        );
    }

    #[test]
    fn cells_are_one_based() {
        assert_eq!(
            parse_command(" 2 3 "),
            Ok(Command::Play(vec![Event::CellPress { row: 1, col: 2 }]))
        );
        assert!(parse_command("0 1").is_err());
    }

    #[test]
    fn clue_shortcuts() {
        assert_eq!(
            parse_command("12d"),
            Ok(Command::Play(vec![Event::CluePress {
                number: 12,
                direction: Direction::Down
            }]))
        );
        assert_eq!(
            parse_command("1A"),
            Ok(Command::Play(vec![Event::CluePress {
                number: 1,
                direction: Direction::Across
            }]))
        );
        assert!(parse_command("7").is_err());
        assert!(parse_command("7x").is_err());
    }

    #[test]
    fn session_commands() {
        assert_eq!(parse_command(":q"), Ok(Command::Quit));
        assert_eq!(parse_command(":new"), Ok(Command::NewGame));
        assert_eq!(parse_command("?"), Ok(Command::Play(vec![Event::Hint])));
        assert!(parse_command(":nope").is_err());
        assert!(parse_command("").is_err());
        assert!(parse_command("a1").is_err());
    }
}
