use crossword::storage::{CURRENT_GAME_KEY, HIGH_SCORES_KEY, USER_PREFERENCES_KEY};
use crossword::{
    CompletedGame, Difficulty, Event, FileStore, FontSize, GameSession, GameStats,
    InMemoryStore, KeyToken, Preferences, PreferencesUpdate, Puzzle, Storage, Store,
};

fn completed(difficulty: Difficulty, score: u32) -> CompletedGame {
    CompletedGame {
        difficulty,
        score,
        error_count: 0,
        stats: GameStats::default(),
        completed_at: None,
    }
}

fn played_session() -> GameSession {
    let mut session = GameSession::new(Puzzle::sample().unwrap(), 0);
    for c in "cas".chars() {
        session.handle(Event::Key(KeyToken::Letter(c)), 1_000);
    }
    session
}

/// Store whose every operation fails.
struct BrokenStore;

#[async_trait::async_trait]
impl Store for BrokenStore {
    async fn get_item(&self, _key: &str) -> anyhow::Result<Option<String>> {
        anyhow::bail!("disk on fire")
    }
    async fn set_item(&self, _key: &str, _value: String) -> anyhow::Result<()> {
        anyhow::bail!("disk on fire")
    }
    async fn remove_item(&self, _key: &str) -> anyhow::Result<()> {
        anyhow::bail!("disk on fire")
    }
}

#[tokio::test]
async fn nothing_saved_loads_as_none() {
    let storage = Storage::new(InMemoryStore::new());
    assert!(storage.load_game_progress(None).await.is_none());
    assert!(storage.load_game_progress(Some("sample")).await.is_none());
    assert!(storage.saved_games().await.is_empty());
    assert!(storage.all_game_stats().await.is_empty());
}

#[tokio::test]
async fn progress_roundtrip_and_upsert() {
    let storage = Storage::new(InMemoryStore::new());
    let mut session = played_session();
    assert!(storage.save_game_progress("sample", &session.snapshot(), 12, 0).await);

    let current = storage.load_game_progress(None).await.unwrap();
    assert_eq!(current.game_id, "sample");
    assert_eq!(current.snapshot, session.snapshot());
    assert_eq!(current.time_elapsed_secs, 12);

    session.handle(Event::Hint, 2_000);
    assert!(storage.save_game_progress("sample", &session.snapshot(), 20, 1).await);
    assert!(storage.save_game_progress("other", &session.snapshot(), 5, 1).await);

    let games = storage.saved_games().await;
    assert_eq!(games.len(), 2);
    let sample = storage.load_game_progress(Some("sample")).await.unwrap();
    assert_eq!(sample.hints_used, 1);
    assert_eq!(sample.time_elapsed_secs, 20);
    assert_eq!(storage.load_game_progress(None).await.unwrap().game_id, "other");

    let restored = GameSession::from_snapshot(sample.snapshot).unwrap();
    assert_eq!(restored.hints().used(), 1);
}

#[tokio::test]
async fn deleting_the_current_game_clears_it() {
    let store = InMemoryStore::new();
    let storage = Storage::new(store.clone());
    let snapshot = played_session().snapshot();
    storage.save_game_progress("a", &snapshot, 1, 0).await;
    storage.save_game_progress("b", &snapshot, 1, 0).await;

    assert!(storage.delete_saved_game("a").await);
    assert_eq!(storage.load_game_progress(None).await.unwrap().game_id, "b");
    assert!(storage.delete_saved_game("b").await);
    assert!(storage.load_game_progress(None).await.is_none());
    assert!(store.get_item(CURRENT_GAME_KEY).await.unwrap().is_none());
    assert!(storage.saved_games().await.is_empty());
}

#[tokio::test]
async fn high_score_tables_are_bounded_and_sorted() {
    let storage = Storage::new(InMemoryStore::new());
    for i in 0..12u32 {
        let game_id = format!("g{}", i);
        assert!(storage.save_game_stats(&game_id, completed(Difficulty::Medium, 100 + i)).await);
    }
    let tier = storage.high_scores_for(Difficulty::Medium).await;
    assert_eq!(tier.len(), 10);
    assert_eq!(tier[0].score, 111);
    assert_eq!(tier[9].score, 102);
    assert!(tier.windows(2).all(|w| w[0].score >= w[1].score));
    assert!(storage.high_scores_for(Difficulty::Hard).await.is_empty());

    for score in [50, 70, 60, 70, 40, 90, 10] {
        storage.save_game_stats("same", completed(Difficulty::Easy, score)).await;
    }
    let per_game: Vec<u32> = storage
        .high_scores_for_game("same")
        .await
        .iter()
        .map(|e| e.score)
        .collect();
    assert_eq!(per_game, vec![90, 70, 70, 60, 50]);

    let stats = storage.game_stats("g3").await.unwrap();
    assert_eq!(stats.score, 103);
    assert!(stats.completed_at.is_some());
}

#[tokio::test]
async fn ties_keep_the_earlier_entry_first() {
    let storage = Storage::new(InMemoryStore::new());
    storage.save_game_stats("first", completed(Difficulty::Hard, 80)).await;
    storage.save_game_stats("second", completed(Difficulty::Hard, 80)).await;
    let tier = storage.high_scores_for(Difficulty::Hard).await;
    let ids: Vec<&str> = tier.iter().map(|e| e.game_id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second"]);
}

#[tokio::test]
async fn zero_scores_stay_out_of_the_tables() {
    let store = InMemoryStore::new();
    let storage = Storage::new(store.clone());
    assert!(storage.save_game_stats("g", completed(Difficulty::Expert, 0)).await);
    assert!(storage.game_stats("g").await.is_some());
    assert!(store.get_item(HIGH_SCORES_KEY).await.unwrap().is_none());
    let scores = storage.high_scores().await;
    assert_eq!(scores.by_difficulty.len(), 4);
    assert!(scores.by_game.is_empty());
}

#[tokio::test]
async fn preferences_default_and_merge() {
    let storage = Storage::new(InMemoryStore::new());
    let defaults = storage.user_preferences().await;
    assert_eq!(defaults, Preferences::default());
    assert!(!defaults.dark_mode);
    assert!(defaults.sound_effects);
    assert_eq!(defaults.language, "es");
    assert_eq!(defaults.font_size, FontSize::Medium);

    let update = PreferencesUpdate {
        dark_mode: Some(true),
        font_size: Some(FontSize::Large),
        ..Default::default()
    };
    assert!(storage.save_user_preferences(update).await);
    let update = PreferencesUpdate {
        auto_check: Some(true),
        ..Default::default()
    };
    assert!(storage.save_user_preferences(update).await);

    let prefs = storage.user_preferences().await;
    assert!(prefs.dark_mode && prefs.auto_check && prefs.sound_effects);
    assert_eq!(prefs.font_size, FontSize::Large);
}

#[tokio::test]
async fn partial_preferences_fill_in_defaults() {
    let store = InMemoryStore::new();
    store
        .set_item(USER_PREFERENCES_KEY, r#"{"dark_mode":true}"#.to_string())
        .await
        .unwrap();
    let prefs = Storage::new(store).user_preferences().await;
    assert!(prefs.dark_mode);
    assert_eq!(prefs.language, "es");
}

#[tokio::test]
async fn clear_all_data_empties_the_store() {
    let store = InMemoryStore::new();
    let storage = Storage::new(store.clone());
    storage.save_game_progress("g", &played_session().snapshot(), 1, 0).await;
    storage.save_game_stats("g", completed(Difficulty::Easy, 50)).await;
    storage
        .save_user_preferences(PreferencesUpdate {
            language: Some("en".to_string()),
            ..Default::default()
        })
        .await;
    assert_eq!(store.len(), 5);
    assert!(storage.clear_all_data().await);
    assert!(store.is_empty());
    assert_eq!(storage.user_preferences().await.language, "es");
}

#[tokio::test]
async fn failing_store_is_best_effort() {
    let storage = Storage::new(BrokenStore);
    let snapshot = played_session().snapshot();
    assert!(!storage.save_game_progress("g", &snapshot, 1, 0).await);
    assert!(storage.load_game_progress(None).await.is_none());
    assert!(!storage.delete_saved_game("g").await);
    assert!(!storage.save_game_stats("g", completed(Difficulty::Easy, 10)).await);
    assert!(storage.high_scores_for(Difficulty::Easy).await.is_empty());
    assert!(!storage.save_user_preferences(PreferencesUpdate::default()).await);
    assert_eq!(storage.user_preferences().await, Preferences::default());
    assert!(!storage.clear_all_data().await);
}

#[tokio::test]
async fn corrupt_records_read_as_missing() {
    let store = InMemoryStore::new();
    store
        .set_item(CURRENT_GAME_KEY, "{not json".to_string())
        .await
        .unwrap();
    let storage = Storage::new(store);
    assert!(storage.load_game_progress(None).await.is_none());
}

#[tokio::test]
async fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot = played_session().snapshot();
    {
        let storage = Storage::new(FileStore::new(dir.path()));
        assert!(storage.save_game_progress("sample", &snapshot, 3, 0).await);
    }
    assert!(dir.path().join("crossword_current_game.json").exists());

    let storage = Storage::new(FileStore::new(dir.path()));
    assert_eq!(storage.store().root(), dir.path());
    let saved = storage.load_game_progress(None).await.unwrap();
    assert_eq!(saved.snapshot, snapshot);

    assert!(storage.clear_all_data().await);
    assert!(!dir.path().join("crossword_current_game.json").exists());
    assert!(storage.load_game_progress(None).await.is_none());
}

#[tokio::test]
async fn file_store_missing_keys() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path().join("not-yet-created"));
    assert!(store.get_item("anything").await.unwrap().is_none());
    store.remove_item("anything").await.unwrap();
    store.set_item("k", "v".to_string()).await.unwrap();
    assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("v"));
}
