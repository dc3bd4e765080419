use async_trait::async_trait;
use nr_core::{KeyValueStore, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::StorageBackend;

/// Process-local storage; everything is lost on exit.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl StorageBackend for InMemoryStorage {
    fn get_error_message() -> &'static str {
        "Memory storage should be available"
    }

    async fn open(_location: Option<&str>) -> Result<Self> {
        Ok(Self::new())
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = InMemoryStorage::new();
        assert!(storage.load("articles").await.unwrap().is_none());

        storage.save("articles", "[1]").await.unwrap();
        storage.save("articles", "[2]").await.unwrap();
        assert_eq!(storage.load("articles").await.unwrap().as_deref(), Some("[2]"));
        assert_eq!(storage.len().await, 1);

        storage.remove("articles").await.unwrap();
        storage.remove("articles").await.unwrap();
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let storage = InMemoryStorage::new();
        let other = storage.clone();
        storage.save("backendSettings", "{}").await.unwrap();
        assert_eq!(other.load("backendSettings").await.unwrap().as_deref(), Some("{}"));
    }
}
