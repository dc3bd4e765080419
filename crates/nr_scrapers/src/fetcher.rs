use async_trait::async_trait;
use nr_core::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument};

/// A downloaded document.
#[derive(Debug, Clone)]
pub struct Page {
    /// URL after redirects
    pub url: String,
    pub content_type: Option<String>,
    pub body: String,
}

impl Page {
    pub fn new(url: impl Into<String>, content_type: Option<&str>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content_type: content_type.map(str::to_string),
            body: body.into(),
        }
    }
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self, url: &str) -> Result<Page>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(default_user_agent())
            .redirect(reqwest::redirect::Policy::limited(10))
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch_page(&self, url: &str) -> Result<Page> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow::anyhow!("Request to {} failed with status {}", url, status).into());
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        debug!(bytes = body.len(), ?content_type, "Fetched page");

        Ok(Page {
            url: final_url,
            content_type,
            body,
        })
    }
}

fn default_user_agent() -> String {
    format!(
        "newsreader/{} (rust; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    )
}
