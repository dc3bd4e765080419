use std::fmt;
use nr_core::{Article, InferenceModel, Result};
use crate::Config;

/// Offline model: the first three sentences of the article stand in for a summary.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub async fn new(_config: Option<Config>) -> Result<Self> {
        Ok(Self)
    }
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn summarize_article(&self, article: &Article) -> Result<String> {
        let sentences: Vec<&str> = article
            .content
            .split_inclusive(|c| c == '.' || c == '!' || c == '?')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(3)
            .collect();

        let summary = if sentences.is_empty() {
            article.title.trim().to_string()
        } else {
            sentences.join(" ")
        };
        tracing::debug!(%summary, "Generated summary from content");
        Ok(summary)
    }
}
