use async_trait::async_trait;
use nr_core::{Error, KeyValueStore, Result};
use std::sync::Arc;
use tracing::{debug, info};

pub mod backends;

pub use backends::*;

/// A key/value backend that can be opened by name from configuration.
#[async_trait]
pub trait StorageBackend: KeyValueStore {
    fn get_error_message() -> &'static str;

    /// Open the backend; `location` is backend specific (a directory, a
    /// database file) and ignored by the in-memory store.
    async fn open(location: Option<&str>) -> Result<Self>
    where
        Self: Sized;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    Memory,
    File,
    #[cfg(feature = "sqlite")]
    SQLite,
}

impl std::str::FromStr for StorageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            #[cfg(feature = "sqlite")]
            "sqlite" => Ok(Self::SQLite),
            other => Err(Error::Storage(format!("Unknown storage backend: {}", other))),
        }
    }
}

async fn open_backend<T: StorageBackend + 'static>(location: Option<&str>) -> Result<Arc<dyn KeyValueStore>> {
    let storage = T::open(location)
        .await
        .map_err(|e| Error::Storage(format!("{} ({})", T::get_error_message(), e)))?;
    Ok(Arc::new(storage))
}

/// Build the backend named `kind`, then make sure it can round-trip a value.
pub async fn create_storage(kind: &str, location: Option<&str>) -> Result<Arc<dyn KeyValueStore>> {
    let storage = match kind.parse::<StorageKind>()? {
        StorageKind::Memory => open_backend::<InMemoryStorage>(location).await?,
        StorageKind::File => open_backend::<FileStorage>(location).await?,
        #[cfg(feature = "sqlite")]
        StorageKind::SQLite => open_backend::<SQLiteStorage>(location).await?,
    };
    check_storage(storage.as_ref()).await?;
    info!(backend = kind, "Storage backend initialized");
    Ok(storage)
}

const PROBE_KEY: &str = "__storage_probe__";

/// Write, read back and delete a probe value.
pub async fn check_storage(storage: &dyn KeyValueStore) -> Result<()> {
    storage.save(PROBE_KEY, "ok").await?;
    let value = storage.load(PROBE_KEY).await?;
    if value.as_deref() != Some("ok") {
        return Err(Error::Storage("Failed to read back probe value".to_string()));
    }
    storage.remove(PROBE_KEY).await?;
    debug!("Storage probe succeeded");
    Ok(())
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, StorageBackend, StorageKind};
}
