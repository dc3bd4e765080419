use async_trait::async_trait;
use crate::Result;

/// String-keyed blob storage, the persistence primitive the client writes
/// its snapshots to.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`
    async fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`; absent keys are not an error
    async fn remove(&self, key: &str) -> Result<()>;
}
