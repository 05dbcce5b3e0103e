//! Records exchanged with the persistence store.

use std::collections::BTreeMap;
use std::string::String;
use std::vec::Vec;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Difficulty, GameStats, SessionSnapshot};

/// An in-progress game as saved by the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    pub game_id: String,
    pub snapshot: SessionSnapshot,
    pub last_played: DateTime<Utc>,
    pub time_elapsed_secs: u64,
    pub hints_used: u32,
}

/// Statistics recorded when a game is finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedGame {
    pub difficulty: Difficulty,
    pub score: u32,
    pub error_count: u32,
    #[serde(flatten)]
    pub stats: GameStats,
    /// Stamped by the storage layer when the record is written.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<crate::core::Completion> for CompletedGame {
    fn from(c: crate::core::Completion) -> Self {
        CompletedGame {
            difficulty: c.difficulty,
            score: c.score,
            error_count: c.error_count,
            stats: c.stats,
            completed_at: None,
        }
    }
}

/// Entry of a per-difficulty high-score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub game_id: String,
    pub score: u32,
    pub date: DateTime<Utc>,
}

/// Entry of a per-puzzle high-score table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScoreEntry {
    pub score: u32,
    pub date: DateTime<Utc>,
}

/// Best scores by difficulty tier and by puzzle, each sorted best first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub by_difficulty: BTreeMap<Difficulty, Vec<HighScoreEntry>>,
    pub by_game: BTreeMap<String, Vec<GameScoreEntry>>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self {
            by_difficulty: Difficulty::ALL.iter().map(|d| (*d, Vec::new())).collect(),
            by_game: BTreeMap::new(),
        }
    }
}

/// Board text size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// User preferences, stored independently of puzzle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub sound_effects: bool,
    pub auto_check: bool,
    pub language: String,
    pub font_size: FontSize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            sound_effects: true,
            auto_check: false,
            language: "es".to_string(),
            font_size: FontSize::Medium,
        }
    }
}

/// Partial preference change; `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferencesUpdate {
    pub dark_mode: Option<bool>,
    pub sound_effects: Option<bool>,
    pub auto_check: Option<bool>,
    pub language: Option<String>,
    pub font_size: Option<FontSize>,
}

impl PreferencesUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Overlay this update on `prefs`.
    pub fn apply_to(self, prefs: &mut Preferences) {
        if let Some(v) = self.dark_mode {
            prefs.dark_mode = v;
        }
        if let Some(v) = self.sound_effects {
            prefs.sound_effects = v;
        }
        if let Some(v) = self.auto_check {
            prefs.auto_check = v;
        }
        if let Some(v) = self.language {
            prefs.language = v;
        }
        if let Some(v) = self.font_size {
            prefs.font_size = v;
        }
    }
}
