use std::fmt;

pub mod models;
pub mod prompt;

/// Selects and configures the summarization model.
#[derive(Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    /// `deepseek` (default) or `dummy`
    pub model_name: Option<String>,
    /// Overrides the API base URL, e.g. a local OpenAI-compatible server
    pub model_url: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("model_url", &self.model_url)
            .finish()
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::models::create_model;
    pub use super::prompt::summary_prompt;
    pub use nr_core::{Article, InferenceModel, Result, Error};
}

pub use models::create_model;
pub use prompt::summary_prompt;
