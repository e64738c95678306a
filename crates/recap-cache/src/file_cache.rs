use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use recap_core::RecapError;
use tokio::fs;
use tokio::sync::Mutex;

use crate::SummaryCache;

/// File-backed cache persisting a flat key→value map as one JSON object.
///
/// The whole map is loaded at open and rewritten on every `put`, so a
/// restarted process sees every previously completed call. Entries are
/// never evicted.
pub struct FileCache {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileCache {
    /// Open a cache file, creating an empty cache if the file is absent.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RecapError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                RecapError::Cache(format!("failed to parse {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                return Err(RecapError::Cache(format!(
                    "failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, entries: &HashMap<String, String>) -> Result<(), RecapError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    RecapError::Cache(format!(
                        "failed to create dir {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| RecapError::Cache(format!("failed to serialize cache: {e}")))?;
        fs::write(&self.path, json).await.map_err(|e| {
            RecapError::Cache(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl SummaryCache for FileCache {
    async fn get(&self, key: &str) -> Result<Option<String>, RecapError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), RecapError> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries).await
    }
}
