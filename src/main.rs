#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use crossword::{
    cli::{self, Command},
    init_logging, CompletedGame, Difficulty, FileStore, FontSize, GameSession, Outcome,
    PreferencesUpdate, Puzzle, Storage,
};

#[cfg(feature = "std")]
use clap::{Parser, Subcommand};
#[cfg(feature = "std")]
use std::path::PathBuf;
#[cfg(feature = "std")]
use std::time::{SystemTime, UNIX_EPOCH};
#[cfg(feature = "std")]
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    /// Directory holding saved games, statistics and preferences.
    #[arg(long, global = true, default_value = ".crossword")]
    data_dir: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
#[cfg(feature = "std")]
enum Commands {
    /// Play the built-in puzzle, resuming the saved game if there is one.
    Play {
        #[arg(long, value_enum, help = "Scoring tier; a different tier starts a new game")]
        difficulty: Option<Difficulty>,
        #[arg(long, help = "Ignore the saved game and start over")]
        fresh: bool,
    },
    /// Show the high-score tables.
    Scores {
        #[arg(long, value_enum)]
        difficulty: Option<Difficulty>,
    },
    /// Show statistics of finished games and the saved games list.
    Stats,
    /// Show or change preferences.
    Prefs {
        #[arg(long)]
        dark_mode: Option<bool>,
        #[arg(long)]
        sound_effects: Option<bool>,
        #[arg(long)]
        auto_check: Option<bool>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long, value_enum)]
        font_size: Option<FontSize>,
    },
    /// Delete every saved game, statistic, score and preference.
    Clear,
}

#[cfg(feature = "std")]
fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Cli::parse();
    let storage = Storage::new(FileStore::new(args.data_dir));

    match args.command {
        Commands::Play { difficulty, fresh } => play(&storage, difficulty, fresh).await?,
        Commands::Scores { difficulty } => {
            let tiers = match difficulty {
                Some(d) => vec![d],
                None => Difficulty::ALL.to_vec(),
            };
            let scores = storage.high_scores().await;
            for tier in tiers {
                let entries = scores.by_difficulty.get(&tier).cloned().unwrap_or_default();
                cli::print_scores(&format!("Best scores ({}):", tier), &entries);
            }
        }
        Commands::Stats => {
            let stats = storage.all_game_stats().await;
            if stats.is_empty() {
                println!("No finished games yet.");
            }
            for (game_id, game) in &stats {
                println!(
                    "{}: {} points ({}), {} errors, {} hints, {}s",
                    game_id,
                    game.score,
                    game.difficulty,
                    game.error_count,
                    game.stats.hints_used,
                    game.stats.time_elapsed_secs
                );
            }
            let saved = storage.saved_games().await;
            if !saved.is_empty() {
                println!("\nSaved games:");
                for game in saved {
                    println!(
                        "  {} last played {}, {}s, {} hints",
                        game.game_id,
                        game.last_played.format("%Y-%m-%d %H:%M"),
                        game.time_elapsed_secs,
                        game.hints_used
                    );
                }
            }
        }
        Commands::Prefs {
            dark_mode,
            sound_effects,
            auto_check,
            language,
            font_size,
        } => {
            let update = PreferencesUpdate {
                dark_mode,
                sound_effects,
                auto_check,
                language,
                font_size,
            };
            if !update.is_empty() && !storage.save_user_preferences(update).await {
                anyhow::bail!("could not save preferences");
            }
            let prefs = storage.user_preferences().await;
            println!("{}", serde_json::to_string_pretty(&prefs)?);
        }
        Commands::Clear => {
            if !storage.clear_all_data().await {
                anyhow::bail!("could not clear stored data");
            }
            println!(
                "All crossword data removed from {}.",
                storage.store().root().display()
            );
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
async fn restore_or_start(
    storage: &Storage<FileStore>,
    difficulty: Option<Difficulty>,
    fresh: bool,
) -> anyhow::Result<GameSession> {
    if !fresh {
        if let Some(saved) = storage.load_game_progress(None).await {
            let tier_matches = difficulty.map_or(true, |d| d == saved.snapshot.puzzle.difficulty());
            if tier_matches && saved.snapshot.completed_at_ms.is_none() {
                match GameSession::from_snapshot(saved.snapshot) {
                    Ok(session) => {
                        println!(
                            "Resuming {} from {}",
                            saved.game_id,
                            saved.last_played.format("%Y-%m-%d %H:%M")
                        );
                        return Ok(session);
                    }
                    Err(e) => log::warn!("saved game is unusable: {}", e),
                }
            }
        }
    }
    let puzzle = Puzzle::sample()
        .map_err(|e| anyhow::anyhow!(e))?
        .with_difficulty(difficulty.unwrap_or_default());
    Ok(GameSession::new(puzzle, now_ms()))
}

#[cfg(feature = "std")]
async fn autosave(storage: &Storage<FileStore>, session: &GameSession) {
    let now = now_ms();
    let stats = session.stats(now);
    let saved = storage
        .save_game_progress(
            session.puzzle().id(),
            &session.snapshot(),
            stats.time_elapsed_secs,
            stats.hints_used,
        )
        .await;
    if !saved {
        log::warn!("progress was not saved; it will be retried on the next move");
    }
}

#[cfg(feature = "std")]
async fn play(
    storage: &Storage<FileStore>,
    difficulty: Option<Difficulty>,
    fresh: bool,
) -> anyhow::Result<()> {
    let prefs = storage.user_preferences().await;
    let mut session = restore_or_start(storage, difficulty, fresh).await?;
    let game_id = session.puzzle().id().to_string();

    println!("Crossword {} ({})", game_id, session.puzzle().difficulty());
    println!("{}", cli::HELP);
    cli::print_session(&session, now_ms());

    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let events = match cli::parse_command(&line) {
            Ok(Command::Play(events)) => events,
            Ok(Command::NewGame) => {
                session.new_game(now_ms());
                autosave(storage, &session).await;
                cli::print_session(&session, now_ms());
                continue;
            }
            Ok(Command::Help) => {
                println!("{}", cli::HELP);
                continue;
            }
            Ok(Command::Quit) => break,
            Err(msg) => {
                println!("{}", msg);
                continue;
            }
        };

        let mut changed = false;
        for event in events {
            match session.handle(event, now_ms()) {
                Outcome::Ignored => {}
                Outcome::Moved | Outcome::Erased => changed = true,
                Outcome::Filled { letter, correct } => {
                    changed = true;
                    if prefs.auto_check && !correct {
                        println!("✗ {} is not right there", letter);
                    }
                }
                Outcome::Revealed(letter) => {
                    changed = true;
                    println!("Hint: {} ({} left)", letter, session.hints().remaining());
                }
                Outcome::HintDenied => println!("No hints left."),
                Outcome::Solved(completion) => {
                    autosave(storage, &session).await;
                    cli::print_session(&session, now_ms());
                    println!(
                        "Solved! {} points, {} errors, {} hints, {}s",
                        completion.score,
                        completion.error_count,
                        completion.stats.hints_used,
                        completion.stats.time_elapsed_secs
                    );
                    if !storage
                        .save_game_stats(&game_id, CompletedGame::from(completion))
                        .await
                    {
                        log::warn!("statistics for {} were not recorded", game_id);
                    }
                    let best = storage.high_scores_for(completion.difficulty).await;
                    cli::print_scores(&format!("Best scores ({}):", completion.difficulty), &best);
                    return Ok(());
                }
            }
        }
        if changed {
            autosave(storage, &session).await;
        }
        cli::print_session(&session, now_ms());
    }

    autosave(storage, &session).await;
    println!("Game saved.");
    Ok(())
}
