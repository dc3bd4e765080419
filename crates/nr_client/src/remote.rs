use async_trait::async_trait;
use nr_core::{BackendSettings, ContentFetcher, Error, ErrorBody, FetchResponse, FetchedArticle, Result};
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

pub const FETCH_PATH: &str = "/fetch-source";

/// Client for the remote fetch service.
#[derive(Debug, Clone, Default)]
pub struct RemoteFetcher {
    client: Client,
}

impl RemoteFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn endpoint(settings: &BackendSettings, url: &str) -> Result<Url> {
        let base = format!("{}{}", settings.url.trim_end_matches('/'), FETCH_PATH);
        let mut endpoint = Url::parse(&base)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", settings.url, e)))?;
        endpoint.query_pairs_mut().append_pair("url", url);
        Ok(endpoint)
    }
}

#[async_trait]
impl ContentFetcher for RemoteFetcher {
    async fn fetch(&self, settings: &BackendSettings, url: &str) -> Result<Vec<FetchedArticle>> {
        let endpoint = Self::endpoint(settings, url)?;
        debug!(%endpoint, "Requesting content from fetch service");

        let response = self
            .client
            .get(endpoint)
            .bearer_auth(&settings.key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .ok()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            warn!(status = status.as_u16(), %message, "Fetch service returned an error");
            return Err(Error::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let items = response.json::<FetchResponse>().await?.into_vec();
        debug!(count = items.len(), "Fetch service returned articles");
        Ok(items)
    }
}
