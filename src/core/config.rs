/// Hints available per playthrough.
pub const HINT_LIMIT: u32 = 2;

/// Solve time, in seconds, after which the time factor bottoms out.
pub const REFERENCE_WINDOW_SECS: u64 = 15 * 60;
/// Lowest fraction of the base points granted for time.
pub const MIN_TIME_FACTOR: f64 = 0.1;
/// Points lost per wrong letter entered.
pub const ERROR_PENALTY: i64 = 10;
/// Points lost per hint used.
pub const HINT_PENALTY: i64 = 20;

/// Entries kept in each difficulty's high-score table.
pub const DIFFICULTY_TOP_SCORES: usize = 10;
/// Entries kept in each puzzle's high-score table.
pub const PUZZLE_TOP_SCORES: usize = 5;

/// Key token that erases the current cell.
pub const DELETE_KEY: char = '⌫';
