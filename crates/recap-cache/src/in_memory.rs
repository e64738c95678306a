use std::collections::HashMap;

use async_trait::async_trait;
use recap_core::RecapError;
use tokio::sync::Mutex;

use crate::SummaryCache;

/// In-memory cache for tests and ephemeral runs.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently stored.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[async_trait]
impl SummaryCache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, RecapError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), RecapError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
