//! Background refresh of per-tenant campaign counts.
//!
//! A thin repeated invocation of the campaign-listing call: the tenant
//! listing endpoint serves the cached result so it never has to fan out to
//! the engagement API on the request path.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::state::AppState;

/// Spawn the refresh loop. Runs once immediately, then on every interval
/// tick until the shutdown channel fires.
pub fn spawn_count_refresh(
    state: Arc<AppState>,
    interval: Duration,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        info!("Campaign count refresh loop started");
        loop {
            match state.runner().list_selectable_tenants().await {
                Ok(tenants) => {
                    debug!(tenants = tenants.len(), "refreshed campaign counts");
                    state.set_cached_tenants(tenants).await;
                }
                Err(e) => {
                    warn!("Campaign count refresh failed: {}", e);
                }
            }

            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Campaign count refresh loop received shutdown signal");
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }
        }
        info!("Campaign count refresh loop stopped");
    })
}
