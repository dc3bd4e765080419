use std::sync::Arc;
use nr_core::{parse_article_url, Error, FetchedArticle, Result};
use tracing::{debug, info, instrument, warn};
use crate::fetcher::PageFetcher;
use crate::scrapers::{default_scrapers, ScraperType};

pub const DEFAULT_MAX_FEED_ITEMS: usize = 20;

/// Downloads a URL and runs it through the registered scrapers in order.
pub struct ScraperManager {
    fetcher: Arc<dyn PageFetcher>,
    scrapers: Vec<ScraperType>,
}

impl ScraperManager {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self::with_max_feed_items(fetcher, DEFAULT_MAX_FEED_ITEMS)
    }

    pub fn with_max_feed_items(fetcher: Arc<dyn PageFetcher>, max_feed_items: usize) -> Self {
        Self {
            fetcher,
            scrapers: default_scrapers(max_feed_items),
        }
    }

    pub fn scraper_names(&self) -> Vec<&str> {
        self.scrapers.iter().map(|s| s.name()).collect()
    }

    #[instrument(level = "info", skip(self))]
    pub async fn scrape_source(&self, url: &str) -> Result<Vec<FetchedArticle>> {
        let url = parse_article_url(url)?;
        let page = self.fetcher.fetch_page(url.as_str()).await?;

        for scraper in self.scrapers.iter().filter(|s| s.can_handle(&page)) {
            match scraper.scrape(&page) {
                Ok(articles) if !articles.is_empty() => {
                    info!(scraper = scraper.name(), count = articles.len(), "Extracted articles");
                    return Ok(articles);
                }
                Ok(_) => debug!(scraper = scraper.name(), "Scraper returned nothing"),
                Err(e) => warn!(scraper = scraper.name(), error = %e, "Scraper failed"),
            }
        }

        Err(Error::Scraping(format!("No readable content found at {}", url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::Page;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticFetcher {
        page: Page,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch_page(&self, _url: &str) -> Result<Page> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.page.clone())
        }
    }

    fn manager(body: &str) -> (ScraperManager, Arc<StaticFetcher>) {
        let fetcher = Arc::new(StaticFetcher {
            page: Page::new("https://example.com/page", None, body),
            calls: AtomicUsize::new(0),
        });
        (ScraperManager::new(fetcher.clone()), fetcher)
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected_before_fetching() {
        let (manager, fetcher) = manager("<p>x</p>");
        let err = manager.scrape_source("not a url").await.unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_html_page_yields_one_article() {
        let (manager, _) = manager(
            "<html><head><title>Hello</title></head><body><main><p>Body text here.</p></main></body></html>",
        );
        let articles = manager.scrape_source("https://example.com/page").await.unwrap();
        assert_eq!(articles.len(), 1);
        assert!(articles[0].content.contains("Body text here."));
    }

    #[tokio::test]
    async fn test_broken_feed_falls_through_to_article_scraper() {
        let (manager, _) = manager("<?xml version=\"1.0\"?><rss><p>Plain paragraph.</p>");
        let articles = manager.scrape_source("https://example.com/page").await.unwrap();
        assert_eq!(articles.len(), 1);
    }

    #[test]
    fn test_scraper_names() {
        let (manager, _) = manager("");
        assert_eq!(manager.scraper_names(), vec!["feed", "article"]);
    }
}
