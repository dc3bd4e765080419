use async_trait::async_trait;
use nr_core::{Error, KeyValueStore, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use crate::StorageBackend;

const DEFAULT_DIR: &str = ".newsreader";

/// Stores every key as `{key}.json` inside one directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub async fn new_with_path(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await.map_err(|e| {
            Error::Storage(format!("Failed to create data directory {}: {}", dir.display(), e))
        })?;
        Ok(Self { dir })
    }

    pub fn get_dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl StorageBackend for FileStorage {
    fn get_error_message() -> &'static str {
        "Data directory should be writable"
    }

    async fn open(location: Option<&str>) -> Result<Self> {
        Self::new_with_path(location.unwrap_or(DEFAULT_DIR)).await
    }
}

#[async_trait]
impl KeyValueStore for FileStorage {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        // Written to a sibling file, then renamed over the snapshot.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote snapshot");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
