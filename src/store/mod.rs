//! Asynchronous key-value store used to persist progress, statistics and preferences.
//!
//! Implementations only move strings around; encoding and the recovery policy
//! live in [`crate::storage`].

/// String key-value store with the read/write contract the game relies on.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    /// Value stored under `key`, or `None` if the key was never written.
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;
    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: String) -> anyhow::Result<()>;
    /// Delete `key`; deleting a missing key succeeds.
    async fn remove_item(&self, key: &str) -> anyhow::Result<()>;

    /// Delete several keys.
    async fn multi_remove(&self, keys: &[&str]) -> anyhow::Result<()> {
        for key in keys {
            self.remove_item(key).await?;
        }
        Ok(())
    }
}

pub mod file;
pub mod in_memory;
