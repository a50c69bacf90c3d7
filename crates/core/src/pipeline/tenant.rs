//! Per-tenant processing.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::config::PipelineConfig;
use crate::engagement::{EngagementApi, EngagementError};
use crate::report::{ReportRow, ReportWindow};
use crate::tenants::Tenant;

use super::batch::BatchScheduler;
use super::isolate;
use super::types::TenantReport;

/// Runs the auth, discovery, and fetch steps for one tenant.
///
/// `process` never fails: any tenant-level error is logged with the
/// tenant's reporting identity and converted into an empty contribution.
pub struct TenantProcessor {
    api: Arc<dyn EngagementApi>,
    scheduler: BatchScheduler,
}

impl TenantProcessor {
    pub fn new(api: Arc<dyn EngagementApi>, config: &PipelineConfig) -> Self {
        Self {
            api,
            scheduler: BatchScheduler::new(config),
        }
    }

    pub async fn process(&self, tenant: &Tenant, window: &ReportWindow) -> TenantReport {
        isolate(
            "tenant",
            &tenant.report_email,
            self.process_inner(tenant, window),
        )
        .await
    }

    async fn process_inner(
        &self,
        tenant: &Tenant,
        window: &ReportWindow,
    ) -> Result<TenantReport, EngagementError> {
        let token = self
            .api
            .acquire_token(&tenant.client_id, &tenant.client_secret)
            .await?;

        let campaigns = self.api.list_campaigns(&token).await?;
        if campaigns.is_empty() {
            debug!(tenant = %tenant.report_email, "no campaigns, nothing to fetch");
            return Ok(TenantReport::default());
        }

        debug!(
            tenant = %tenant.report_email,
            campaigns = campaigns.len(),
            "fetching open events"
        );

        let events = self
            .scheduler
            .fetch_batch(self.api.as_ref(), &token, &campaigns, window)
            .await;

        let mut counts: HashMap<String, u64> = HashMap::new();
        let rows = events
            .into_iter()
            .map(|event| {
                *counts.entry(event.prospect_email.clone()).or_insert(0) += 1;
                ReportRow::new(&tenant.report_email, event)
            })
            .collect();

        Ok(TenantReport { rows, counts })
    }
}
