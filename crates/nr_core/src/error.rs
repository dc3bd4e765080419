use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Backend settings are not configured")]
    NotConfigured,

    #[error("No new articles found")]
    NothingNew,

    /// The fetch service answered with a non-success status.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Errors caused by what the user typed rather than by a collaborator.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidUrl(_) | Error::InvalidInput(_) | Error::NotConfigured
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
