use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use nr_core::{
    parse_article_url, Article, BackendSettings, ContentFetcher, Error, InferenceModel, KeyValueStore, Result,
};
use tracing::{debug, info, warn};
use crate::repository::{Repository, ARTICLES_KEY, SETTINGS_KEY};
use crate::settings::SettingsManager;
use crate::store::{ArticleStore, SummaryOutcome};
use crate::view::View;

/// Per-article affordances a view can trigger by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleAction {
    Summarize,
    Remove,
}

impl ArticleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleAction::Summarize => "summarize",
            ArticleAction::Remove => "remove",
        }
    }
}

impl fmt::Display for ArticleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summarize" => Ok(ArticleAction::Summarize),
            "remove" => Ok(ArticleAction::Remove),
            other => Err(Error::InvalidInput(format!("Unknown action: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Summarized(SummaryOutcome),
    Removed(bool),
}

/// The client application: article list, backend settings and the
/// collaborators that fill the list.
pub struct App {
    store: ArticleStore,
    settings: SettingsManager,
    fetcher: Arc<dyn ContentFetcher>,
    model: Arc<dyn InferenceModel>,
    view: Arc<dyn View>,
}

impl App {
    /// Restores state from `storage` and renders the initial list.
    pub async fn start(
        storage: Arc<dyn KeyValueStore>,
        fetcher: Arc<dyn ContentFetcher>,
        model: Arc<dyn InferenceModel>,
        view: Arc<dyn View>,
    ) -> Result<Self> {
        let store = ArticleStore::load(Repository::new(storage.clone(), ARTICLES_KEY), view.clone()).await?;
        let settings = SettingsManager::load(Repository::new(storage, SETTINGS_KEY), view.clone()).await?;
        Ok(Self {
            store,
            settings,
            fetcher,
            model,
            view,
        })
    }

    pub fn store(&self) -> &ArticleStore {
        &self.store
    }

    pub fn settings(&self) -> &SettingsManager {
        &self.settings
    }

    /// Shows `err` to the user and hands it back.
    fn report(&self, err: Error) -> Error {
        if err.is_user_error() {
            debug!(error = %err, "Rejected input");
        } else {
            warn!(error = %err, "Action failed");
        }
        self.view.notify(&err.to_string());
        err
    }

    pub async fn save_settings(&self, url: &str, key: &str) -> Result<BackendSettings> {
        self.settings.save(url, key).await.map_err(|e| self.report(e))
    }

    /// Adds an article from typed or pasted text.
    pub async fn add_text(&self, title: &str, content: &str) -> Result<Article> {
        let (title, content) = (title.trim(), content.trim());
        if title.is_empty() || content.is_empty() {
            return Err(self.report(Error::InvalidInput(
                "Please provide both a title and content".to_string(),
            )));
        }
        let article = Article::pasted(title, content);
        self.store.add(article.clone()).await?;
        Ok(article)
    }

    /// Fetches `url` through the remote service and merges what comes back.
    /// Returns the number of articles added.
    pub async fn add_url(&self, url: &str) -> Result<usize> {
        let target = parse_article_url(url).map_err(|e| self.report(e))?;

        let Some(settings) = self.settings.current().await.filter(BackendSettings::is_configured) else {
            warn!("Cannot fetch without backend settings");
            let err = self.report(Error::NotConfigured);
            self.view.prompt_settings();
            return Err(err);
        };

        let items = match self.fetcher.fetch(&settings, target.as_str()).await {
            Ok(items) => items,
            Err(e) => {
                warn!(url = %target, error = %e, "Fetching failed");
                let unreachable = matches!(e, Error::Http(_));
                let err = self.report(e);
                if unreachable {
                    self.view.prompt_settings();
                }
                return Err(err);
            }
        };

        let incoming: Vec<Article> = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| Article::fetched(item, target.as_str(), index))
            .collect();

        match self.store.merge(incoming).await {
            Ok(added) => {
                info!(url = %target, added, "Added articles from URL");
                Ok(added)
            }
            Err(e @ Error::NothingNew) => Err(self.report(e)),
            Err(e) => Err(e),
        }
    }

    pub async fn summarize(&self, id: &str) -> Result<SummaryOutcome> {
        self.store.summarize(id, self.model.as_ref()).await
    }

    pub async fn remove(&self, id: &str) -> Result<bool> {
        self.store.remove(id).await
    }

    /// Runs a named per-article action, as triggered from a rendered list.
    pub async fn dispatch(&self, action: &str, id: &str) -> Result<ActionOutcome> {
        match action.parse::<ArticleAction>()? {
            ArticleAction::Summarize => self.summarize(id).await.map(ActionOutcome::Summarized),
            ArticleAction::Remove => self.remove(id).await.map(ActionOutcome::Removed),
        }
    }
}
