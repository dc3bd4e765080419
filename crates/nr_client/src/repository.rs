use std::borrow::Borrow;
use std::marker::PhantomData;
use std::sync::Arc;
use nr_core::{KeyValueStore, Result};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

pub const ARTICLES_KEY: &str = "articles";
pub const SETTINGS_KEY: &str = "backendSettings";

/// One JSON snapshot of `T` stored under a fixed key.
pub struct Repository<T> {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> Repository<T> {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            _marker: PhantomData,
        }
    }

    /// A stored value that is not valid JSON is reported and treated as absent.
    pub async fn load(&self) -> Result<Option<T>> {
        let Some(raw) = self.store.load(self.key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key = self.key, error = %e, "Ignoring unreadable snapshot");
                Ok(None)
            }
        }
    }

    /// Stores `value`, which may be any borrowed form of `T` (a slice for a
    /// `Vec`, for instance).
    pub async fn save<V>(&self, value: &V) -> Result<()>
    where
        V: Serialize + ?Sized,
        T: Borrow<V>,
    {
        let raw = serde_json::to_string(value)?;
        self.store.save(self.key, &raw).await
    }
}
