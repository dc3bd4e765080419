use async_trait::async_trait;
use std::fmt;
use crate::types::Article;
use crate::Result;

#[async_trait]
pub trait InferenceModel: Send + Sync + fmt::Debug {
    /// Human readable model name for logs
    fn name(&self) -> &str;

    /// Produce a one-paragraph summary of the article
    async fn summarize_article(&self, article: &Article) -> Result<String>;
}
