use std::sync::Arc;

use tokio::sync::RwLock;

use aperta_core::{Config, ReportRunner, SanitizedConfig, SelectableTenant};

/// Shared application state
pub struct AppState {
    config: Config,
    runner: Arc<ReportRunner>,
    /// Last known selectable tenants, maintained by the refresh loop.
    tenant_cache: RwLock<Vec<SelectableTenant>>,
}

impl AppState {
    pub fn new(config: Config, runner: Arc<ReportRunner>) -> Self {
        Self {
            config,
            runner,
            tenant_cache: RwLock::new(Vec::new()),
        }
    }

    pub fn runner(&self) -> &ReportRunner {
        &self.runner
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub async fn cached_tenants(&self) -> Vec<SelectableTenant> {
        self.tenant_cache.read().await.clone()
    }

    pub async fn set_cached_tenants(&self, tenants: Vec<SelectableTenant>) {
        *self.tenant_cache.write().await = tenants;
    }
}
