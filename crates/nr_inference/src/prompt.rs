/// Build the fixed summarization prompt for one article.
pub fn summary_prompt(title: &str, content: &str) -> String {
    format!(
        "Summarize the following article in a concise paragraph:\n\n---\n\nTitle: {}\n\n{}",
        title, content
    )
}
