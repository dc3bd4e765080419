use std::sync::Arc;
use std::time::Duration;
use nr_core::{parse_article_url, BackendSettings, Error, Result};
use tokio::sync::RwLock;
use tracing::{debug, info};
use crate::repository::Repository;
use crate::view::View;

/// How long after startup the settings prompt appears when the fetch
/// service has not been configured yet.
pub const SETTINGS_PROMPT_DELAY: Duration = Duration::from_millis(500);

/// Holds the fetch service url and key.
pub struct SettingsManager {
    settings: Arc<RwLock<Option<BackendSettings>>>,
    repo: Repository<BackendSettings>,
}

impl SettingsManager {
    /// Restores saved settings. If none are usable, the view is asked for
    /// them once [`SETTINGS_PROMPT_DELAY`] has passed, unless they were
    /// saved in the meantime.
    pub async fn load(repo: Repository<BackendSettings>, view: Arc<dyn View>) -> Result<Self> {
        let settings = Arc::new(RwLock::new(repo.load().await?));
        let configured = settings
            .read()
            .await
            .as_ref()
            .is_some_and(BackendSettings::is_configured);

        if configured {
            debug!("Backend settings restored");
        } else {
            info!("Backend settings missing, prompting shortly");
            let pending = settings.clone();
            tokio::spawn(async move {
                tokio::time::sleep(SETTINGS_PROMPT_DELAY).await;
                let still_missing = !pending
                    .read()
                    .await
                    .as_ref()
                    .is_some_and(BackendSettings::is_configured);
                if still_missing {
                    view.prompt_settings();
                }
            });
        }

        Ok(Self { settings, repo })
    }

    /// Replaces the stored settings. Both fields are required; a trailing
    /// `/` on the url is dropped.
    pub async fn save(&self, url: &str, key: &str) -> Result<BackendSettings> {
        let url = url.trim();
        let key = key.trim();
        if url.is_empty() || key.is_empty() {
            return Err(Error::InvalidInput(
                "Both the backend URL and access key are required".to_string(),
            ));
        }
        parse_article_url(url)?;

        let settings = BackendSettings::new(url.trim_end_matches('/'), key);
        self.repo.save(&settings).await?;
        *self.settings.write().await = Some(settings.clone());
        info!(url = %settings.url, "Saved backend settings");
        Ok(settings)
    }

    pub async fn current(&self) -> Option<BackendSettings> {
        self.settings.read().await.clone()
    }

    pub async fn is_configured(&self) -> bool {
        self.settings
            .read()
            .await
            .as_ref()
            .is_some_and(BackendSettings::is_configured)
    }
}
