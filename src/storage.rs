//! Best-effort persistence of games, statistics, high scores and preferences.
//!
//! Every operation swallows store and encoding failures: writes report
//! `false`, reads fall back to "nothing saved". Play never depends on a save
//! succeeding; the next autosave carries the then-current state.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::{Difficulty, SessionSnapshot, DIFFICULTY_TOP_SCORES, PUZZLE_TOP_SCORES};
use crate::domain::{
    CompletedGame, GameScoreEntry, HighScoreEntry, HighScores, Preferences, PreferencesUpdate,
    SavedGame,
};
use crate::store::Store;

/// Keys used in the underlying store.
pub const SAVED_GAMES_KEY: &str = "crossword_saved_games";
pub const CURRENT_GAME_KEY: &str = "crossword_current_game";
pub const GAME_STATS_KEY: &str = "crossword_game_stats";
pub const USER_PREFERENCES_KEY: &str = "crossword_user_preferences";
pub const HIGH_SCORES_KEY: &str = "crossword_high_scores";

pub const ALL_KEYS: [&str; 5] = [
    SAVED_GAMES_KEY,
    CURRENT_GAME_KEY,
    GAME_STATS_KEY,
    USER_PREFERENCES_KEY,
    HIGH_SCORES_KEY,
];

/// Persistence policy on top of a [`Store`].
pub struct Storage<S: Store> {
    store: S,
}

impl<S: Store> Storage<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> anyhow::Result<Option<T>> {
        match self.store.get_item(key).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set_item(key, json).await
    }

    /// Save `snapshot` as the current game and upsert it into the saved-games list.
    pub async fn save_game_progress(
        &self,
        game_id: &str,
        snapshot: &SessionSnapshot,
        time_elapsed_secs: u64,
        hints_used: u32,
    ) -> bool {
        let saved = SavedGame {
            game_id: game_id.to_string(),
            snapshot: snapshot.clone(),
            last_played: Utc::now(),
            time_elapsed_secs,
            hints_used,
        };
        let result: anyhow::Result<()> = async {
            self.write(CURRENT_GAME_KEY, &saved).await?;
            let mut games: Vec<SavedGame> = self.read(SAVED_GAMES_KEY).await?.unwrap_or_default();
            match games.iter_mut().find(|g| g.game_id == game_id) {
                Some(existing) => *existing = saved,
                None => games.push(saved),
            }
            self.write(SAVED_GAMES_KEY, &games).await
        }
        .await;
        report(result, "saving game progress")
    }

    /// Current game when `game_id` is `None`, otherwise that game from the saved list.
    pub async fn load_game_progress(&self, game_id: Option<&str>) -> Option<SavedGame> {
        let result: anyhow::Result<Option<SavedGame>> = async {
            match game_id {
                None => self.read::<SavedGame>(CURRENT_GAME_KEY).await,
                Some(id) => Ok(self
                    .read::<Vec<SavedGame>>(SAVED_GAMES_KEY)
                    .await?
                    .and_then(|games| games.into_iter().find(|g| g.game_id == id))),
            }
        }
        .await;
        recover(result, "loading game progress").flatten()
    }

    /// Every saved in-progress game.
    pub async fn saved_games(&self) -> Vec<SavedGame> {
        let result = self.read::<Vec<SavedGame>>(SAVED_GAMES_KEY).await;
        recover(result, "listing saved games").flatten().unwrap_or_default()
    }

    /// Remove a saved game; clears the current game too when it is the same one.
    pub async fn delete_saved_game(&self, game_id: &str) -> bool {
        let result: anyhow::Result<()> = async {
            let Some(mut games) = self.read::<Vec<SavedGame>>(SAVED_GAMES_KEY).await? else {
                return Ok(());
            };
            games.retain(|g| g.game_id != game_id);
            self.write(SAVED_GAMES_KEY, &games).await?;
            let current = self.read::<SavedGame>(CURRENT_GAME_KEY).await?;
            if current.is_some_and(|c| c.game_id == game_id) {
                self.store.remove_item(CURRENT_GAME_KEY).await?;
            }
            Ok(())
        }
        .await;
        report(result, "deleting saved game")
    }

    /// Record a finished game's statistics and update the high-score tables.
    pub async fn save_game_stats(&self, game_id: &str, mut stats: CompletedGame) -> bool {
        let result: anyhow::Result<()> = async {
            let mut all: BTreeMap<String, CompletedGame> =
                self.read(GAME_STATS_KEY).await?.unwrap_or_default();
            stats.completed_at = Some(Utc::now());
            let (score, difficulty) = (stats.score, stats.difficulty);
            all.insert(game_id.to_string(), stats);
            self.write(GAME_STATS_KEY, &all).await?;
            self.update_high_score(game_id, score, difficulty).await
        }
        .await;
        report(result, "saving game statistics")
    }

    /// Statistics of one finished game.
    pub async fn game_stats(&self, game_id: &str) -> Option<CompletedGame> {
        self.all_game_stats().await.remove(game_id)
    }

    /// Statistics of every finished game, keyed by game id.
    pub async fn all_game_stats(&self) -> BTreeMap<String, CompletedGame> {
        let result = self.read(GAME_STATS_KEY).await;
        recover(result, "reading game statistics")
            .flatten()
            .unwrap_or_default()
    }

    // Zero scores never enter the tables.
    async fn update_high_score(
        &self,
        game_id: &str,
        score: u32,
        difficulty: Difficulty,
    ) -> anyhow::Result<()> {
        if score == 0 {
            return Ok(());
        }
        let mut scores: HighScores = self.read(HIGH_SCORES_KEY).await?.unwrap_or_default();
        let date = Utc::now();

        let tier = scores.by_difficulty.entry(difficulty).or_default();
        tier.push(HighScoreEntry {
            game_id: game_id.to_string(),
            score,
            date,
        });
        keep_best(tier, DIFFICULTY_TOP_SCORES, |e| e.score);

        let per_game = scores.by_game.entry(game_id.to_string()).or_default();
        per_game.push(GameScoreEntry { score, date });
        keep_best(per_game, PUZZLE_TOP_SCORES, |e| e.score);

        self.write(HIGH_SCORES_KEY, &scores).await
    }

    /// Both high-score tables; empty tables when nothing has been recorded.
    pub async fn high_scores(&self) -> HighScores {
        let result = self.read(HIGH_SCORES_KEY).await;
        recover(result, "reading high scores")
            .flatten()
            .unwrap_or_default()
    }

    /// Best scores of one difficulty tier.
    pub async fn high_scores_for(&self, difficulty: Difficulty) -> Vec<HighScoreEntry> {
        self.high_scores()
            .await
            .by_difficulty
            .remove(&difficulty)
            .unwrap_or_default()
    }

    /// Best scores of one puzzle.
    pub async fn high_scores_for_game(&self, game_id: &str) -> Vec<GameScoreEntry> {
        self.high_scores()
            .await
            .by_game
            .remove(game_id)
            .unwrap_or_default()
    }

    /// Stored preferences, or the defaults when none were saved.
    pub async fn user_preferences(&self) -> Preferences {
        let result = self.read(USER_PREFERENCES_KEY).await;
        recover(result, "reading preferences")
            .flatten()
            .unwrap_or_default()
    }

    /// Merge `update` into the stored preferences.
    pub async fn save_user_preferences(&self, update: PreferencesUpdate) -> bool {
        let result: anyhow::Result<()> = async {
            let mut prefs: Preferences =
                self.read(USER_PREFERENCES_KEY).await?.unwrap_or_default();
            update.apply_to(&mut prefs);
            self.write(USER_PREFERENCES_KEY, &prefs).await
        }
        .await;
        report(result, "saving preferences")
    }

    /// Remove every key this module writes.
    pub async fn clear_all_data(&self) -> bool {
        let result = self.store.multi_remove(&ALL_KEYS).await;
        report(result, "clearing data")
    }
}

/// Sort best first, keeping earlier entries ahead on ties, then truncate.
fn keep_best<T>(entries: &mut Vec<T>, limit: usize, score: impl Fn(&T) -> u32) {
    entries.sort_by(|a, b| score(b).cmp(&score(a)));
    entries.truncate(limit);
}

fn report(result: anyhow::Result<()>, what: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::error!("{} failed: {:#}", what, e);
            false
        }
    }
}

fn recover<T>(result: anyhow::Result<T>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("{} failed: {:#}", what, e);
            None
        }
    }
}
