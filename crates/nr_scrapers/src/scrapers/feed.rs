use feed_rs::parser;
use nr_core::{Error, FetchedArticle, Result};
use tracing::debug;
use crate::fetcher::Page;
use super::utils::{html_to_text, normalize_whitespace};
use super::Scraper;

/// Turns RSS/Atom documents into one article per entry.
#[derive(Debug, Clone)]
pub struct FeedScraper {
    max_items: usize,
}

impl FeedScraper {
    pub fn new(max_items: usize) -> Self {
        Self { max_items }
    }
}

impl Scraper for FeedScraper {
    fn name(&self) -> &str {
        "feed"
    }

    fn can_handle(&self, page: &Page) -> bool {
        let content_type = page
            .content_type
            .as_deref()
            .unwrap_or_default()
            .to_ascii_lowercase();
        if content_type.contains("rss") || content_type.contains("atom") {
            return true;
        }

        let head = page
            .body
            .trim_start()
            .chars()
            .take(512)
            .collect::<String>()
            .to_ascii_lowercase();
        head.starts_with("<rss")
            || head.starts_with("<feed")
            || (head.starts_with("<?xml")
                && (head.contains("<rss") || head.contains("<feed") || head.contains("<rdf:rdf")))
    }

    fn scrape(&self, page: &Page) -> Result<Vec<FetchedArticle>> {
        let feed = parser::parse(page.body.as_bytes())
            .map_err(|e| Error::Scraping(format!("Failed to parse feed {}: {}", page.url, e)))?;

        let total = feed.entries.len();
        let articles: Vec<FetchedArticle> = feed
            .entries
            .into_iter()
            .filter_map(|entry| {
                let body = entry
                    .content
                    .and_then(|c| c.body)
                    .or_else(|| entry.summary.map(|s| s.content))?;
                let content = html_to_text(&body);
                if content.is_empty() {
                    return None;
                }
                let title = entry
                    .title
                    .map(|t| normalize_whitespace(&t.content))
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| "Untitled".to_string());
                let url = entry.links.into_iter().next().map(|l| l.href);
                Some(FetchedArticle { title, content, url })
            })
            .take(self.max_items)
            .collect();

        debug!(url = %page.url, total, kept = articles.len(), "Parsed feed");
        if articles.is_empty() {
            return Err(Error::Scraping(format!("Feed {} has no readable entries", page.url)));
        }
        Ok(articles)
    }
}
