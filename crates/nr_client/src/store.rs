use std::collections::HashSet;
use std::sync::Arc;
use nr_core::{Article, Error, InferenceModel, Result};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use crate::repository::Repository;
use crate::view::View;

/// What a summarize request ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// No article has that id, or it was removed while the model was working
    NotFound,
    /// Another request for the same article is still running
    InProgress,
    Completed(String),
    /// The model failed; the user has been notified
    Failed(String),
}

/// The ordered article list, newest first.
///
/// Every mutation persists the full list and re-renders it before the write
/// lock is released, so the stored snapshot always matches memory.
pub struct ArticleStore {
    articles: RwLock<Vec<Article>>,
    repo: Repository<Vec<Article>>,
    view: Arc<dyn View>,
}

impl ArticleStore {
    /// Restores the stored list (or starts empty) and renders it.
    pub async fn load(repo: Repository<Vec<Article>>, view: Arc<dyn View>) -> Result<Self> {
        let articles = repo.load().await?.unwrap_or_default();
        info!(count = articles.len(), "Loaded articles");
        view.render(&articles);
        Ok(Self {
            articles: RwLock::new(articles),
            repo,
            view,
        })
    }

    async fn commit(&self, articles: &[Article]) -> Result<()> {
        self.repo.save(articles).await?;
        self.view.render(articles);
        Ok(())
    }

    pub async fn articles(&self) -> Vec<Article> {
        self.articles.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Article> {
        self.articles.read().await.iter().find(|a| a.id == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }

    /// Prepends a single article.
    pub async fn add(&self, article: Article) -> Result<()> {
        let mut articles = self.articles.write().await;
        debug!(id = %article.id, "Adding article");
        let mut next = Vec::with_capacity(articles.len() + 1);
        next.push(article);
        next.extend(articles.iter().cloned());
        self.commit(&next).await?;
        *articles = next;
        Ok(())
    }

    /// Prepends the incoming articles whose source is not already listed,
    /// keeping their order. Returns how many were added, or
    /// [`Error::NothingNew`] without touching storage when none are new.
    pub async fn merge(&self, incoming: Vec<Article>) -> Result<usize> {
        let mut articles = self.articles.write().await;
        let known: HashSet<&str> = articles.iter().map(|a| a.source.as_str()).collect();
        let mut next: Vec<Article> = incoming
            .into_iter()
            .filter(|a| !known.contains(a.source.as_str()))
            .collect();

        if next.is_empty() {
            debug!("Every incoming article is already listed");
            return Err(Error::NothingNew);
        }

        let added = next.len();
        next.extend(articles.iter().cloned());
        self.commit(&next).await?;
        *articles = next;
        info!(added, total = articles.len(), "Merged articles");
        Ok(added)
    }

    /// Removes the article with `id`. A missing id changes nothing but the
    /// list is still persisted and rendered.
    pub async fn remove(&self, id: &str) -> Result<bool> {
        let mut articles = self.articles.write().await;
        let next: Vec<Article> = articles.iter().filter(|a| a.id != id).cloned().collect();
        let removed = next.len() != articles.len();
        if !removed {
            debug!(id, "Remove requested for unknown article");
        }
        self.commit(&next).await?;
        *articles = next;
        Ok(removed)
    }

    /// Requests a summary for one article.
    ///
    /// The in-progress flag is set before the model is called and cleared on
    /// every exit path; a second request for the same article while the
    /// first is running returns [`SummaryOutcome::InProgress`] without calling
    /// the model. The lock is not held while the model works.
    ///
    /// Memory only changes once the snapshot holding the change is stored.
    pub async fn summarize(&self, id: &str, model: &dyn InferenceModel) -> Result<SummaryOutcome> {
        let snapshot = {
            let mut articles = self.articles.write().await;
            let Some(index) = articles.iter().position(|a| a.id == id) else {
                return Ok(SummaryOutcome::NotFound);
            };
            if articles[index].is_summarizing {
                debug!(id, "Summary already in progress");
                return Ok(SummaryOutcome::InProgress);
            }

            let mut next = articles.clone();
            next[index].is_summarizing = true;
            self.commit(&next).await?;
            *articles = next;
            articles[index].clone()
        };

        info!(id, model = model.name(), "Summarizing article");
        let result = model
            .summarize_article(&snapshot)
            .await
            .and_then(|summary| {
                let summary = summary.trim().to_string();
                if summary.is_empty() {
                    Err(Error::Inference("Model returned an empty summary".to_string()))
                } else {
                    Ok(summary)
                }
            });

        let mut articles = self.articles.write().await;
        let Some(index) = articles.iter().position(|a| a.id == id) else {
            warn!(id, "Article removed while summarizing, discarding result");
            return Ok(SummaryOutcome::NotFound);
        };

        let mut next = articles.clone();
        next[index].is_summarizing = false;
        let outcome = match result {
            Ok(summary) => {
                next[index].summary = Some(summary.clone());
                SummaryOutcome::Completed(summary)
            }
            Err(e) => {
                warn!(id, error = %e, "Summarization failed");
                SummaryOutcome::Failed(e.to_string())
            }
        };

        if let Err(e) = self.commit(&next).await {
            // The flag is never stored, so clearing it keeps memory equal to the last snapshot.
            articles[index].is_summarizing = false;
            self.view.render(&articles);
            return Err(e);
        }
        *articles = next;
        drop(articles);

        if let SummaryOutcome::Failed(message) = &outcome {
            self.view.notify(&format!("Failed to summarize article: {}", message));
        }
        Ok(outcome)
    }
}
