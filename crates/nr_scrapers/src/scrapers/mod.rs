use nr_core::{FetchedArticle, Result};
use crate::fetcher::Page;

pub mod article;
pub mod feed;
pub mod jsonld;

pub use article::ArticleScraper;
pub use feed::FeedScraper;

pub trait Scraper: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Returns true if this scraper understands the page
    fn can_handle(&self, page: &Page) -> bool;

    /// Extracts every article the page contains
    fn scrape(&self, page: &Page) -> Result<Vec<FetchedArticle>>;
}

/// Enum that holds all possible scraper types
#[derive(Debug, Clone)]
pub enum ScraperType {
    Feed(FeedScraper),
    Article(ArticleScraper),
}

impl ScraperType {
    pub fn name(&self) -> &str {
        match self {
            ScraperType::Feed(s) => s.name(),
            ScraperType::Article(s) => s.name(),
        }
    }

    pub fn can_handle(&self, page: &Page) -> bool {
        match self {
            ScraperType::Feed(s) => s.can_handle(page),
            ScraperType::Article(s) => s.can_handle(page),
        }
    }

    pub fn scrape(&self, page: &Page) -> Result<Vec<FetchedArticle>> {
        match self {
            ScraperType::Feed(s) => s.scrape(page),
            ScraperType::Article(s) => s.scrape(page),
        }
    }
}

/// Feeds are tried before the generic article extractor.
pub fn default_scrapers(max_feed_items: usize) -> Vec<ScraperType> {
    vec![
        ScraperType::Feed(FeedScraper::new(max_feed_items)),
        ScraperType::Article(ArticleScraper::new()),
    ]
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use scraper::{ElementRef, Html, Selector};

    /// Collapses runs of whitespace into single spaces.
    pub fn normalize_whitespace(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    pub fn element_text(element: &ElementRef) -> String {
        normalize_whitespace(&element.text().collect::<String>())
    }

    /// Plain text of an HTML fragment, one line per block of text.
    pub fn html_to_text(html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        let paragraphs = Selector::parse("p, h1, h2, h3, h4").ok();
        let blocks: Vec<String> = paragraphs
            .map(|sel| {
                fragment
                    .select(&sel)
                    .map(|el| element_text(&el))
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        if blocks.is_empty() {
            normalize_whitespace(&fragment.root_element().text().collect::<Vec<_>>().join(" "))
        } else {
            blocks.join("\n\n")
        }
    }

    pub fn extract_text(document: &Html, selector: &str) -> Option<String> {
        let selector = Selector::parse(selector).ok()?;
        document
            .select(&selector)
            .next()
            .map(|el| element_text(&el))
            .filter(|t| !t.is_empty())
    }

    pub fn extract_texts(document: &Html, selector: &str) -> Vec<String> {
        let Ok(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        document
            .select(&selector)
            .map(|el| element_text(&el))
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::utils;
    use scraper::Html;

    #[test]
    fn test_extract_text() {
        let html = r#"
            <div class="title">  Test
                Title </div>
            <div class="content">Test Content</div>
        "#;
        let document = Html::parse_document(html);

        assert_eq!(utils::extract_text(&document, ".title").as_deref(), Some("Test Title"));
        assert!(utils::extract_text(&document, ".invalid").is_none());
    }

    #[test]
    fn test_extract_texts() {
        let html = r#"
            <div class="item">Item 1</div>
            <div class="item"> </div>
            <div class="item">Item 2</div>
        "#;
        let document = Html::parse_document(html);

        let texts = utils::extract_texts(&document, ".item");
        assert_eq!(texts, vec!["Item 1".to_string(), "Item 2".to_string()]);
    }

    #[test]
    fn test_html_to_text() {
        assert_eq!(
            utils::html_to_text("<p>First <b>para</b>.</p><p>Second.</p>"),
            "First para.\n\nSecond."
        );
        assert_eq!(utils::html_to_text("plain   text"), "plain text");
    }

    #[test]
    fn test_default_scrapers_try_feeds_first() {
        let scrapers = default_scrapers(5);
        assert_eq!(scrapers.len(), 2);
        assert_eq!(scrapers[0].name(), "feed");
        assert_eq!(scrapers[1].name(), "article");
    }
}
