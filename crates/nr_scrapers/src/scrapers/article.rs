use dom_smoothie::{Config, Readability};
use nr_core::{Error, FetchedArticle, Result};
use scraper::{Html, Selector};
use tracing::debug;
use crate::fetcher::Page;
use super::jsonld::extract_headline;
use super::utils::{element_text, extract_text, extract_texts};
use super::Scraper;

/// Containers that usually hold the story body, most specific first.
const CONTENT_SELECTORS: &[&str] = &["article", "main", ".post-content", ".entry-content", "#content"];

/// Generic single-article extractor for HTML pages.
#[derive(Debug, Clone)]
pub struct ArticleScraper {
    max_elements_to_parse: usize,
}

impl Default for ArticleScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleScraper {
    pub fn new() -> Self {
        Self {
            max_elements_to_parse: 9000,
        }
    }

    /// Readability pass; `None` when it finds nothing usable.
    fn readability(&self, page: &Page) -> Option<(String, String)> {
        let cfg = Config {
            max_elements_to_parse: self.max_elements_to_parse,
            ..Default::default()
        };
        let mut readability = Readability::new(page.body.as_str(), Some(page.url.as_str()), Some(cfg)).ok()?;
        let article = readability.parse().ok()?;
        let content = article
            .text_content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        if content.is_empty() {
            return None;
        }
        Some((article.title.trim().to_string(), content))
    }
}

/// Selector heuristics used when readability gives up.
pub fn fallback_content(document: &Html) -> Option<String> {
    for selector in CONTENT_SELECTORS {
        let Ok(sel) = Selector::parse(selector) else {
            continue;
        };
        if let Some(element) = document.select(&sel).next() {
            let Ok(p) = Selector::parse("p") else {
                continue;
            };
            let paragraphs: Vec<String> = element
                .select(&p)
                .map(|el| element_text(&el))
                .filter(|t| !t.is_empty())
                .collect();
            let text = if paragraphs.is_empty() {
                element_text(&element)
            } else {
                paragraphs.join("\n\n")
            };
            if !text.is_empty() {
                debug!(selector, chars = text.len(), "Found content using selector");
                return Some(text);
            }
        }
    }

    let paragraphs = extract_texts(document, "p");
    if paragraphs.is_empty() {
        None
    } else {
        debug!(count = paragraphs.len(), "Fell back to all <p> tags");
        Some(paragraphs.join("\n\n"))
    }
}

/// Title from JSON-LD, then `<h1>`, then `<title>`.
pub fn fallback_title(document: &Html) -> Option<String> {
    extract_headline(document)
        .or_else(|| extract_text(document, "h1"))
        .or_else(|| extract_text(document, "title"))
}

impl Scraper for ArticleScraper {
    fn name(&self) -> &str {
        "article"
    }

    fn can_handle(&self, _page: &Page) -> bool {
        true
    }

    fn scrape(&self, page: &Page) -> Result<Vec<FetchedArticle>> {
        let document = Html::parse_document(&page.body);

        let (title, content) = match self.readability(page) {
            Some((title, content)) => (Some(title).filter(|t| !t.is_empty()), content),
            None => {
                debug!(url = %page.url, "Readability found nothing, using selectors");
                let content = fallback_content(&document).ok_or_else(|| {
                    Error::Scraping(format!("No readable content found at {}", page.url))
                })?;
                (None, content)
            }
        };

        let title = title
            .or_else(|| fallback_title(&document))
            .unwrap_or_else(|| page.url.clone());

        Ok(vec![FetchedArticle {
            title,
            content,
            url: Some(page.url.clone()),
        }])
    }
}
