use std::fmt;
use std::sync::Arc;
use nr_scrapers::ScraperManager;

pub struct AppState {
    pub scraper: Arc<ScraperManager>,
    /// Bearer token every fetch request must present
    pub secret: String,
}

impl AppState {
    pub fn new(scraper: ScraperManager, secret: impl Into<String>) -> Self {
        Self {
            scraper: Arc::new(scraper),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("scrapers", &self.scraper.scraper_names())
            .field("secret", &"<redacted>")
            .finish()
    }
}
