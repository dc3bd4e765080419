pub mod fetcher;
pub mod manager;
pub mod scrapers;

pub use fetcher::{HttpFetcher, Page, PageFetcher};
pub use manager::{ScraperManager, DEFAULT_MAX_FEED_ITEMS};
pub use scrapers::Scraper;

pub mod prelude {
    pub use super::scrapers::{Scraper, ScraperType};
    pub use super::{HttpFetcher, Page, PageFetcher, ScraperManager};
    pub use nr_core::{FetchedArticle, Result, Error};
}
