mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{item, memory_storage, stored_articles, CannedFetcher, RecordingView, ScriptedModel};
use nr_client::{ActionOutcome, App, SummaryOutcome, ARTICLES_KEY, SETTINGS_KEY, SETTINGS_PROMPT_DELAY};
use nr_core::{BackendSettings, Error, KeyValueStore, PASTED_TEXT_SOURCE};

struct Harness {
    app: App,
    storage: Arc<dyn KeyValueStore>,
    view: Arc<RecordingView>,
    fetcher: Arc<CannedFetcher>,
    model: Arc<ScriptedModel>,
}

async fn harness(fetcher: CannedFetcher, configured: bool) -> Harness {
    let storage = memory_storage();
    if configured {
        let settings = BackendSettings::new("https://backend.test", "secret");
        storage
            .save(SETTINGS_KEY, &serde_json::to_string(&settings).unwrap())
            .await
            .unwrap();
    }
    let view = Arc::new(RecordingView::default());
    let fetcher = Arc::new(fetcher);
    let model = Arc::new(ScriptedModel::answering());
    let app = App::start(storage.clone(), fetcher.clone(), model.clone(), view.clone())
        .await
        .unwrap();
    Harness {
        app,
        storage,
        view,
        fetcher,
        model,
    }
}

#[tokio::test]
async fn pasted_article_can_be_summarized() {
    let h = harness(CannedFetcher::returning(vec![]), true).await;

    let article = h.app.add_text("  Local note ", " Something happened. ").await.unwrap();
    assert!(article.id.starts_with("text-"));
    assert_eq!(article.title, "Local note");
    assert_eq!(article.source, PASTED_TEXT_SOURCE);

    let outcome = h.app.dispatch("summarize", &article.id).await.unwrap();
    assert_eq!(
        outcome,
        ActionOutcome::Summarized(SummaryOutcome::Completed("Summary of Local note".to_string()))
    );
    assert_eq!(h.model.call_count(), 1);

    let stored = stored_articles(&h.storage, ARTICLES_KEY).await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].summary.as_deref(), Some("Summary of Local note"));
}

#[tokio::test]
async fn blank_text_is_rejected() {
    let h = harness(CannedFetcher::returning(vec![]), true).await;
    let err = h.app.add_text("Title", "   ").await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(h.app.store().is_empty().await);
    assert_eq!(h.view.notices().len(), 1);
}

#[tokio::test]
async fn url_without_settings_prompts_instead_of_fetching() {
    let h = harness(CannedFetcher::returning(vec![item("A", None)]), false).await;

    let err = h.app.add_url("https://news.test/a").await.unwrap_err();
    assert!(matches!(err, Error::NotConfigured));
    assert_eq!(h.fetcher.call_count(), 0);
    assert!(h.view.prompt_count() >= 1);
    assert!(h.app.store().is_empty().await);
}

#[tokio::test]
async fn startup_without_settings_prompts_after_delay() {
    let h = harness(CannedFetcher::returning(vec![]), false).await;
    assert_eq!(h.view.prompt_count(), 0);
    tokio::time::sleep(SETTINGS_PROMPT_DELAY + Duration::from_millis(200)).await;
    assert_eq!(h.view.prompt_count(), 1);
}

#[tokio::test]
async fn startup_with_settings_does_not_prompt() {
    let h = harness(CannedFetcher::returning(vec![]), true).await;
    tokio::time::sleep(SETTINGS_PROMPT_DELAY + Duration::from_millis(200)).await;
    assert_eq!(h.view.prompt_count(), 0);
    assert!(h.app.settings().is_configured().await);
}

#[tokio::test]
async fn saving_settings_normalizes_url() {
    let h = harness(CannedFetcher::returning(vec![]), false).await;
    let saved = h.app.save_settings(" https://backend.test/ ", "key").await.unwrap();
    assert_eq!(saved.url, "https://backend.test");

    let raw = h.storage.load(SETTINGS_KEY).await.unwrap().unwrap();
    let stored: BackendSettings = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored, saved);

    assert!(h.app.save_settings("https://backend.test", " ").await.is_err());
    assert_eq!(h.app.settings().current().await, Some(saved));
}

#[tokio::test]
async fn url_items_are_merged_with_sources() {
    let h = harness(
        CannedFetcher::returning(vec![item("A", Some("https://news.test/a")), item("B", None)]),
        true,
    )
    .await;

    let added = h.app.add_url("https://news.test/feed").await.unwrap();
    assert_eq!(added, 2);

    let articles = h.app.store().articles().await;
    assert_eq!(articles[0].title, "A");
    assert_eq!(articles[0].source, "https://news.test/a");
    assert_eq!(articles[1].source, "https://news.test/feed");
    assert!(articles.iter().all(|a| a.id.starts_with("url-")));
    assert_ne!(articles[0].id, articles[1].id);
}

#[tokio::test]
async fn fetching_same_url_twice_finds_nothing_new() {
    let h = harness(CannedFetcher::returning(vec![item("A", None)]), true).await;
    h.app.add_url("https://news.test/a").await.unwrap();
    let before = h.storage.load(ARTICLES_KEY).await.unwrap();

    let err = h.app.add_url("https://news.test/a").await.unwrap_err();
    assert!(matches!(err, Error::NothingNew));
    assert_eq!(h.view.notices(), vec!["No new articles found".to_string()]);
    assert_eq!(h.storage.load(ARTICLES_KEY).await.unwrap(), before);
    assert_eq!(h.app.store().len().await, 1);
}

#[tokio::test]
async fn backend_error_message_reaches_user() {
    let h = harness(CannedFetcher::rejecting(401, "Invalid access token"), true).await;
    let err = h.app.add_url("https://news.test/a").await.unwrap_err();
    assert!(matches!(err, Error::Backend { status: 401, .. }));
    assert_eq!(h.view.notices(), vec!["Invalid access token".to_string()]);
    assert!(h.app.store().is_empty().await);
}

#[tokio::test]
async fn malformed_url_is_rejected_locally() {
    let h = harness(CannedFetcher::returning(vec![item("A", None)]), true).await;
    let err = h.app.add_url("news.test/a").await.unwrap_err();
    assert!(matches!(err, Error::InvalidUrl(_)));
    assert_eq!(h.fetcher.call_count(), 0);
}

#[tokio::test]
async fn dispatch_routes_remove_and_rejects_unknown_actions() {
    let h = harness(CannedFetcher::returning(vec![]), true).await;
    let article = h.app.add_text("Note", "Body.").await.unwrap();

    assert!(matches!(
        h.app.dispatch("archive", &article.id).await,
        Err(Error::InvalidInput(_))
    ));
    assert_eq!(
        h.app.dispatch("remove", &article.id).await.unwrap(),
        ActionOutcome::Removed(true)
    );
    assert!(h.app.store().is_empty().await);
}
