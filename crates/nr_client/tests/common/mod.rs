#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use nr_client::View;
use nr_core::{Article, BackendSettings, ContentFetcher, Error, FetchedArticle, InferenceModel, KeyValueStore, Result};
use nr_storage::InMemoryStorage;

/// Records everything the client asks the view to do.
#[derive(Default)]
pub struct RecordingView {
    pub renders: Mutex<Vec<Vec<Article>>>,
    pub notices: Mutex<Vec<String>>,
    pub prompts: AtomicUsize,
}

impl RecordingView {
    pub fn last_render(&self) -> Vec<Article> {
        self.renders.lock().unwrap().last().cloned().unwrap_or_default()
    }

    pub fn render_count(&self) -> usize {
        self.renders.lock().unwrap().len()
    }

    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl View for RecordingView {
    fn render(&self, articles: &[Article]) {
        self.renders.lock().unwrap().push(articles.to_vec());
    }

    fn notify(&self, message: &str) {
        self.notices.lock().unwrap().push(message.to_string());
    }

    fn prompt_settings(&self) {
        self.prompts.fetch_add(1, Ordering::SeqCst);
    }
}

/// Model that answers after a delay, or fails, and counts its calls.
#[derive(Debug)]
pub struct ScriptedModel {
    pub calls: AtomicUsize,
    pub delay: Duration,
    pub fail: bool,
}

impl ScriptedModel {
    pub fn answering() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            delay: Duration::from_millis(0),
            fail: false,
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::answering()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::answering()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InferenceModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn summarize_article(&self, article: &Article) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(Error::Inference("model offline".to_string()));
        }
        Ok(format!("  Summary of {}  ", article.title))
    }
}

/// Fetch service stand-in returning a fixed batch.
pub struct CannedFetcher {
    pub calls: AtomicUsize,
    pub items: Vec<FetchedArticle>,
    pub error: Option<(u16, String)>,
}

impl CannedFetcher {
    pub fn returning(items: Vec<FetchedArticle>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            items,
            error: None,
        }
    }

    pub fn rejecting(status: u16, message: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            items: Vec::new(),
            error: Some((status, message.to_string())),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentFetcher for CannedFetcher {
    async fn fetch(&self, _settings: &BackendSettings, _url: &str) -> Result<Vec<FetchedArticle>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.error {
            Some((status, message)) => Err(Error::Backend {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(self.items.clone()),
        }
    }
}

pub fn item(title: &str, url: Option<&str>) -> FetchedArticle {
    FetchedArticle {
        title: title.to_string(),
        content: format!("{} body. More text here.", title),
        url: url.map(str::to_string),
    }
}

pub fn memory_storage() -> Arc<dyn KeyValueStore> {
    Arc::new(InMemoryStorage::new())
}

/// Parses whatever is stored under `key` as a list of articles.
pub async fn stored_articles(storage: &Arc<dyn KeyValueStore>, key: &str) -> Vec<Article> {
    let raw = storage.load(key).await.unwrap().unwrap_or_else(|| "[]".to_string());
    serde_json::from_str(&raw).unwrap()
}

/// In-memory storage whose writes can be switched to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: InMemoryStorage,
    failing: AtomicBool,
}

impl FlakyStore {
    pub fn fail_saves(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        self.inner.load(key).await
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Storage("disk full".to_string()));
        }
        self.inner.save(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key).await
    }
}
