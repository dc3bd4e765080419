pub mod app;
pub mod remote;
pub mod render;
pub mod repository;
pub mod settings;
pub mod store;
pub mod view;

pub use app::{ActionOutcome, App, ArticleAction};
pub use remote::RemoteFetcher;
pub use render::render_articles;
pub use repository::{Repository, ARTICLES_KEY, SETTINGS_KEY};
pub use settings::{SettingsManager, SETTINGS_PROMPT_DELAY};
pub use store::{ArticleStore, SummaryOutcome};
pub use view::View;

pub mod prelude {
    pub use crate::app::{App, ArticleAction};
    pub use crate::remote::RemoteFetcher;
    pub use crate::store::SummaryOutcome;
    pub use crate::view::View;
    pub use nr_core::{Article, BackendSettings, Error, Result};
}
