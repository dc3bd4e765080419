use scraper::{Html, Selector};
use serde_json::Value;

/// Extracts the article headline from JSON-LD metadata in the HTML document.
///
/// Handles top-level objects, arrays of objects and `@graph` containers.
pub fn extract_headline(document: &Html) -> Option<String> {
    let script_selector = Selector::parse("script[type='application/ld+json']").ok()?;

    for script in document.select(&script_selector) {
        let raw = script.text().collect::<String>();
        if let Ok(json) = serde_json::from_str::<Value>(raw.trim()) {
            if let Some(headline) = find_headline(&json) {
                return Some(headline);
            }
        }
    }
    None
}

fn find_headline(json: &Value) -> Option<String> {
    match json {
        Value::Array(items) => items.iter().find_map(find_headline),
        Value::Object(obj) => {
            let own = obj
                .get("headline")
                .or_else(|| obj.get("name").filter(|_| is_article_type(obj.get("@type"))))
                .and_then(|v| v.as_str())
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty());
            own.or_else(|| obj.get("@graph").and_then(find_headline))
        }
        _ => None,
    }
}

fn is_article_type(kind: Option<&Value>) -> bool {
    match kind {
        Some(Value::String(s)) => s.ends_with("Article"),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .any(|k| k.as_str().is_some_and(|s| s.ends_with("Article"))),
        _ => false,
    }
}
