use crossword::{
    Clue, Difficulty, Direction, Event, GameSession, Grid, KeyToken, Outcome, Puzzle, PuzzleError,
    HINT_LIMIT,
};

fn session() -> GameSession {
    GameSession::new(Puzzle::sample().unwrap(), 0)
}

fn type_word(session: &mut GameSession, word: &str, now_ms: u64) -> Vec<Outcome> {
    word.chars()
        .map(|c| session.handle(Event::Key(KeyToken::Letter(c)), now_ms))
        .collect()
}

#[test]
fn typing_the_first_word() {
    let mut s = session();
    let outcomes = type_word(&mut s, "casa", 1_000);
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, Outcome::Filled { correct: true, .. })));
    assert_eq!(s.cursor().position(), (1, 0));
    assert_eq!(s.cursor().active_clue(), Some(4));
    assert!(!s.is_complete());
    assert!(s.is_clue_solved(1, Direction::Across));
    assert!(!s.is_clue_solved(1, Direction::Down));
    assert_eq!(s.error_count(), 0);
    assert_eq!(s.stats(1_000).progress_pct, 36);
}

#[test]
fn wrong_letters_count_as_errors() {
    let mut s = session();
    let outcome = s.handle(Event::Key(KeyToken::Letter('x')), 0);
    assert_eq!(
        outcome,
        Outcome::Filled {
            letter: 'X',
            correct: false
        }
    );
    assert_eq!(s.error_count(), 1);
    assert_eq!(s.stats(0).accuracy_pct, 0);
}

#[test]
fn delete_key_erases_then_steps_back() {
    let mut s = session();
    type_word(&mut s, "ca", 0);
    assert_eq!(s.handle(Event::Key(KeyToken::Delete), 0), Outcome::Erased);
    assert_eq!(s.cursor().position(), (0, 1));
    assert_eq!(s.puzzle().grid().get(0, 1).unwrap().value(), Some('A'));
    s.handle(Event::Key(KeyToken::Delete), 0);
    assert_eq!(s.puzzle().grid().get(0, 1).unwrap().value(), None);
    assert_eq!(s.cursor().position(), (0, 1));
}

#[test]
fn hint_reveals_and_advances_like_a_keystroke() {
    let mut s = session();
    s.handle(Event::CellPress { row: 0, col: 2 }, 0);
    assert_eq!(s.handle(Event::Hint, 0), Outcome::Revealed('S'));
    assert_eq!(s.cursor().position(), (0, 3));
    assert_eq!(s.hints().used(), 1);
    assert_eq!(s.error_count(), 0);
    assert!(s.puzzle().grid().get(0, 2).unwrap().is_correct());
}

#[test]
fn hint_budget_runs_out() {
    let mut s = session();
    for _ in 0..HINT_LIMIT {
        assert!(matches!(s.handle(Event::Hint, 0), Outcome::Revealed(_)));
    }
    let before = s.snapshot();
    assert_eq!(s.apply(Event::Hint, 0), Err(PuzzleError::BudgetExhausted));
    assert_eq!(s.handle(Event::Hint, 0), Outcome::HintDenied);
    assert_eq!(s.snapshot(), before);
    assert_eq!(s.hints().remaining(), 0);
}

#[test]
fn blocked_cells_and_unknown_clues_are_ignored() {
    let mut s = session();
    let before = s.snapshot();
    assert_eq!(s.handle(Event::CellPress { row: 1, col: 3 }, 0), Outcome::Ignored);
    assert_eq!(
        s.handle(
            Event::CluePress {
                number: 9,
                direction: Direction::Down
            },
            0
        ),
        Outcome::Ignored
    );
    assert_eq!(s.snapshot(), before);
    assert_eq!(
        s.apply(
            Event::CluePress {
                number: 9,
                direction: Direction::Down
            },
            0
        ),
        Err(PuzzleError::ClueNotFound {
            number: 9,
            direction: Direction::Down
        })
    );
}

#[test]
fn out_of_bounds_press_is_an_error() {
    let mut s = session();
    assert_eq!(
        s.apply(Event::CellPress { row: 7, col: 0 }, 0),
        Err(PuzzleError::OutOfBounds { row: 7, col: 0 })
    );
}

#[test]
fn solving_reports_completion_once() {
    let mut s = session();
    type_word(&mut s, "casa", 0);
    type_word(&mut s, "oso", 0);
    type_word(&mut s, "sol", 0);
    let last = s.handle(Event::Key(KeyToken::Letter('a')), 60_000);
    let completion = match last {
        Outcome::Solved(c) => c,
        other => panic!("expected completion, got {:?}", other),
    };
    assert_eq!(completion.difficulty, Difficulty::Easy);
    assert_eq!(completion.stats.time_elapsed_secs, 60);
    assert_eq!(completion.score, 93);
    assert_eq!(completion.stats.progress_pct, 100);
    assert_eq!(s.completed_at_ms(), Some(60_000));

    // retyping a solved grid does not report again
    s.handle(Event::CellPress { row: 0, col: 0 }, 61_000);
    let again = s.handle(Event::Key(KeyToken::Letter('c')), 61_000);
    assert!(matches!(again, Outcome::Filled { correct: true, .. }));
}

#[test]
fn cell_views_highlight_the_line() {
    let mut s = session();
    s.handle(Event::CellPress { row: 1, col: 1 }, 0);
    let views = s.cell_views();
    assert_eq!(views.len(), 4);
    assert!(views[1][1].is_selected);
    assert!(views[1][0].is_active_word_member);
    assert!(views[1][2].is_active_word_member);
    assert!(!views[1][3].is_active_word_member);
    assert!(views[1][3].is_blocked);
    assert!(!views[0][1].is_active_word_member);
    assert_eq!(views[0][0].clue_number, Some(1));

    s.handle(Event::CellPress { row: 1, col: 1 }, 0);
    let views = s.cell_views();
    assert!(views[0][1].is_active_word_member);
    assert!(views[2][1].is_active_word_member);
    assert!(!views[1][0].is_active_word_member);
    assert_eq!(s.active_word(), vec![(0, 1), (1, 1), (2, 1)]);
    assert_eq!(
        s.active_clue().map(|c| c.text.as_str()),
        Some("Del verbo asar: yo ...")
    );
}

#[test]
fn new_game_resets_everything() {
    let mut s = session();
    type_word(&mut s, "xy", 0);
    s.handle(Event::Hint, 0);
    s.new_game(5_000);
    assert_eq!(s.error_count(), 0);
    assert_eq!(s.hints().used(), 0);
    assert_eq!(s.started_at_ms(), 5_000);
    assert_eq!(s.cursor().position(), (0, 0));
    assert_eq!(s.stats(5_000).filled_cells, 0);
}

#[test]
fn snapshot_restores_the_session() {
    let mut s = session();
    type_word(&mut s, "cas", 2_000);
    s.handle(Event::Hint, 3_000);
    let restored = GameSession::from_snapshot(s.snapshot()).unwrap();
    assert_eq!(restored.snapshot(), s.snapshot());
    assert_eq!(restored.cursor().position(), (1, 0));
    assert_eq!(restored.hints().used(), 1);
}

#[test]
fn restore_sends_a_stale_cursor_home() {
    let s = session();
    let mut snapshot = s.snapshot();
    let grid = snapshot.puzzle.grid().clone();
    snapshot.cursor = crossword::Cursor::at(&grid, 1, 3, Direction::Across);
    let restored = GameSession::from_snapshot(snapshot).unwrap();
    assert_eq!(restored.cursor().position(), (0, 0));
    assert_eq!(restored.cursor().active_clue(), Some(1));
}

#[test]
fn single_row_puzzle_wraps_when_full() {
    let grid = Grid::from_layout(&["SOL"]).unwrap();
    let puzzle = Puzzle::new("sol", Difficulty::Medium, grid, vec![Clue::across(1, "Astro")]).unwrap();
    let mut s = GameSession::new(puzzle, 0);
    type_word(&mut s, "so", 0);
    assert_eq!(s.cursor().position(), (0, 2));
    let outcome = s.handle(Event::Key(KeyToken::Letter('l')), 0);
    assert!(matches!(outcome, Outcome::Solved(c) if c.score == 200));
    assert_eq!(s.cursor().position(), (0, 0));
}
