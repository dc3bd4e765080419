use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source recorded for articles typed or pasted by the user.
pub const PASTED_TEXT_SOURCE: &str = "Pasted Text";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Set only while a summary request is outstanding; never stored.
    #[serde(skip)]
    pub is_summarizing: bool,
}

impl Article {
    /// Builds an article from user-supplied text with a `text-{millis}` id.
    pub fn pasted(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: format!("text-{}", Utc::now().timestamp_millis()),
            title: title.into(),
            content: content.into(),
            source: PASTED_TEXT_SOURCE.to_string(),
            summary: None,
            is_summarizing: false,
        }
    }

    /// Builds an article from one item of a fetch-service response.
    ///
    /// `index` is the item's position in its batch so that articles created
    /// within the same millisecond get distinct ids. Items that do not carry
    /// their own url are attributed to `requested_url`.
    pub fn fetched(item: FetchedArticle, requested_url: &str, index: usize) -> Self {
        Self {
            id: format!("url-{}-{}", Utc::now().timestamp_millis(), index),
            title: item.title,
            content: item.content,
            source: item.url.unwrap_or_else(|| requested_url.to_string()),
            summary: None,
            is_summarizing: false,
        }
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub url: String,
    pub key: String,
}

impl BackendSettings {
    pub fn new(url: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            key: key.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.key.trim().is_empty()
    }
}

impl fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendSettings")
            .field("url", &self.url)
            .field("key", &"<redacted>")
            .finish()
    }
}

/// One extracted article as exchanged with the fetch service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchedArticle {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Success body of the fetch service: one article or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FetchResponse {
    Many(Vec<FetchedArticle>),
    One(FetchedArticle),
}

impl FetchResponse {
    pub fn into_vec(self) -> Vec<FetchedArticle> {
        match self {
            FetchResponse::Many(items) => items,
            FetchResponse::One(item) => vec![item],
        }
    }
}

/// Error body of the fetch service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
