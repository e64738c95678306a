mod file_cache;
mod in_memory;

pub use file_cache::FileCache;
pub use in_memory::InMemoryCache;

use async_trait::async_trait;
use recap_core::RecapError;

/// Trait for caching summarization results.
///
/// Keys are canonical call signatures; values are the returned summary
/// strings. Entries are written only on successful call completion and
/// are never evicted.
#[async_trait]
pub trait SummaryCache: Send + Sync {
    /// Look up a cached result by key.
    async fn get(&self, key: &str) -> Result<Option<String>, RecapError>;
    /// Store a result in the cache.
    async fn put(&self, key: &str, value: &str) -> Result<(), RecapError>;
    /// Check whether a key is present.
    async fn contains(&self, key: &str) -> Result<bool, RecapError> {
        Ok(self.get(key).await?.is_some())
    }
}
