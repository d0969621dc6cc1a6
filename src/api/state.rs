use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::dashboard::Dashboard;
use crate::ingest::CsvLoader;

/// The dataset currently loaded in the server, if any.
pub type SharedSession = Arc<RwLock<Option<Arc<Dashboard>>>>;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub loader: CsvLoader,
    pub session: SharedSession,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let loader = CsvLoader::new(config.validation.policy);
        Self {
            config: Arc::new(config),
            loader,
            session: Arc::new(RwLock::new(None)),
        }
    }

    /// Snapshot of the loaded dashboard. The lock is released on return.
    pub async fn current(&self) -> Option<Arc<Dashboard>> {
        self.session.read().await.clone()
    }

    /// Swap in a new dashboard, discarding the previous one.
    pub async fn replace(&self, dashboard: Dashboard) {
        *self.session.write().await = Some(Arc::new(dashboard));
    }

    /// Discard the loaded dashboard. Returns whether one was loaded.
    pub async fn clear(&self) -> bool {
        self.session.write().await.take().is_some()
    }
}
