use nr_core::Article;

pub const EMPTY_LIST_MESSAGE: &str = "No articles yet. Add one from a URL or paste some text.";

const EXCERPT_CHARS: usize = 160;

fn excerpt(content: &str) -> String {
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= EXCERPT_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(EXCERPT_CHARS).collect();
    format!("{}…", cut.trim_end())
}

/// Plain-text rendering of the article list, newest first.
pub fn render_articles(articles: &[Article]) -> String {
    if articles.is_empty() {
        return format!("{}\n", EMPTY_LIST_MESSAGE);
    }

    let mut out = String::new();
    for article in articles {
        out.push_str(&format!("[{}] {}\n", article.id, article.title));
        out.push_str(&format!("    source:  {}\n", article.source));
        out.push_str(&format!("    {}\n", excerpt(&article.content)));
        if article.is_summarizing {
            out.push_str("    summary: Summarizing…\n");
        } else if let Some(summary) = &article.summary {
            out.push_str(&format!("    summary: {}\n", summary));
        }
        out.push_str(&format!(
            "    actions: summarize {id} | remove {id}\n\n",
            id = article.id
        ));
    }
    out
}
