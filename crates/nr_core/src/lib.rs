pub mod error;
pub mod fetch;
pub mod models;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use fetch::ContentFetcher;
pub use models::InferenceModel;
pub use storage::KeyValueStore;
pub use types::{Article, BackendSettings, ErrorBody, FetchResponse, FetchedArticle, PASTED_TEXT_SOURCE};

/// Checks that `input` is an absolute http(s) URL and returns it normalized.
pub fn parse_article_url(input: &str) -> Result<url::Url> {
    let parsed = url::Url::parse(input.trim())
        .map_err(|e| Error::InvalidUrl(format!("{}: {}", input.trim(), e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(Error::InvalidUrl(format!("unsupported scheme {}", other))),
    }
}
