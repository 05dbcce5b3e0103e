#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod core;
#[cfg(feature = "std")]
pub mod domain;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
pub mod storage;
#[cfg(feature = "std")]
pub mod store;
#[cfg(feature = "std")]
pub mod cli;

pub use crate::core::*;
#[cfg(feature = "std")]
pub use domain::{
    CompletedGame, FontSize, GameScoreEntry, HighScoreEntry, HighScores, Preferences,
    PreferencesUpdate, SavedGame,
};
#[cfg(feature = "std")]
pub use logging::init_logging;
#[cfg(feature = "std")]
pub use storage::Storage;
#[cfg(feature = "std")]
pub use store::{file::FileStore, in_memory::InMemoryStore, Store};
