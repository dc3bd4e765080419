use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use nr_core::{Article, Error, InferenceModel, Result};
use tracing::{debug, warn};
use crate::prompt::summary_prompt;

const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";
/// Summaries always use this model id.
pub const SUMMARY_MODEL: &str = "deepseek-chat";

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Chat-completions client for DeepSeek or any OpenAI-compatible endpoint.
pub struct DeepSeekModel {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl DeepSeekModel {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::Inference("DeepSeek API key is required".to_string()))?;
        Ok(Self {
            client: Arc::new(Client::new()),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

}

impl fmt::Debug for DeepSeekModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeepSeekModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl InferenceModel for DeepSeekModel {
    fn name(&self) -> &str {
        "DeepSeek"
    }

    async fn summarize_article(&self, article: &Article) -> Result<String> {
        let request = ChatRequest {
            model: SUMMARY_MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: summary_prompt(&article.title, &article.content),
            }],
        };

        debug!(article = %article.id, "Requesting summary");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Summarization request rejected");
            return Err(Error::Inference(format!(
                "Summarization API returned {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let response = response.json::<ChatResponse>().await?;
        let summary = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .unwrap_or_default();

        if summary.is_empty() {
            return Err(Error::Inference("Summarization API returned no text".to_string()));
        }
        Ok(summary)
    }
}
