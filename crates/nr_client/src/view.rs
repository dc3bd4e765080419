use nr_core::Article;

/// Where the client shows its state: the list itself, blocking notices and
/// the backend settings prompt.
pub trait View: Send + Sync {
    /// Redraw the whole list; called after every mutation
    fn render(&self, articles: &[Article]);

    /// Show a message the user has to acknowledge
    fn notify(&self, message: &str);

    /// Ask the user for the fetch service url and key
    fn prompt_settings(&self);
}
