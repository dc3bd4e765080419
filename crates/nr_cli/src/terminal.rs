use std::sync::atomic::{AtomicBool, Ordering};
use nr_client::{render_articles, View};
use nr_core::Article;

/// Prints the list to stdout and notices to stderr.
pub struct TerminalView {
    /// The list rendered at startup is only printed by `list`
    show_initial: bool,
    started: AtomicBool,
}

impl TerminalView {
    pub fn new(show_initial: bool) -> Self {
        Self {
            show_initial,
            started: AtomicBool::new(false),
        }
    }
}

impl View for TerminalView {
    fn render(&self, articles: &[Article]) {
        let first = !self.started.swap(true, Ordering::SeqCst);
        if first && !self.show_initial {
            return;
        }
        print!("{}", render_articles(articles));
    }

    fn notify(&self, message: &str) {
        eprintln!("! {}", message);
    }

    fn prompt_settings(&self) {
        eprintln!("Configure the fetch service with: nr settings set --url <URL> --key <KEY>");
    }
}
