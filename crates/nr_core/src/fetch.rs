use async_trait::async_trait;
use crate::types::{BackendSettings, FetchedArticle};
use crate::Result;

/// Client side of the content-fetch service.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Ask the service behind `settings` to extract the articles found at `url`
    async fn fetch(&self, settings: &BackendSettings, url: &str) -> Result<Vec<FetchedArticle>>;
}
