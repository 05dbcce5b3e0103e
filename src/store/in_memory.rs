use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;

use crate::store::Store;

/// Process-local store; clones share the same map.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.items.lock().map(|items| items.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl Store for InMemoryStore {
    async fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let items = self.items.lock().map_err(|_| anyhow!("store lock poisoned"))?;
        Ok(items.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: String) -> anyhow::Result<()> {
        let mut items = self.items.lock().map_err(|_| anyhow!("store lock poisoned"))?;
        items.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let mut items = self.items.lock().map_err(|_| anyhow!("store lock poisoned"))?;
        items.remove(key);
        Ok(())
    }
}
