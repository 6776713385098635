use crate::config::DashboardConfig;
use crate::errors::DashboardError;
use crate::github::GithubClient;
use crate::storage::Store;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub github: GithubClient,
    pub store: Store,
}

impl AppState {
    pub fn new(config: DashboardConfig, store: Store) -> Result<Self, DashboardError> {
        let config = Arc::new(config);
        let github = GithubClient::new(Arc::clone(&config))?;
        Ok(Self { config, github, store })
    }

    pub async fn init(config: DashboardConfig) -> Result<Self, DashboardError> {
        if let Some(parent) = config.data_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let store = Store::open(config.data_path.clone()).await;
        info!(
            repo = %config.repo,
            store = %store.path().display(),
            "dashboard context ready"
        );
        Self::new(config, store)
    }

    pub async fn dispose(&self) -> Result<(), DashboardError> {
        self.store.flush().await?;
        info!("store flushed");
        Ok(())
    }
}
