//! Cross-tenant report orchestration.

use std::path::PathBuf;
use std::sync::Arc;

use futures::future;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::engagement::{EngagementApi, EngagementError};
use crate::metrics;
use crate::report::{
    AggregatedReport, ReportSink, ReportSummary, ReportWindow, SelectableTenant,
};
use crate::tenants::{Tenant, TenantStore};

use super::isolate;
use super::tenant::TenantProcessor;
use super::types::{ReportError, ReportRequest};

/// Drives one report-generation request end to end: validate, resolve
/// tenants, fan out, merge, persist.
pub struct ReportRunner {
    store: Arc<dyn TenantStore>,
    api: Arc<dyn EngagementApi>,
    sink: Arc<dyn ReportSink>,
    processor: TenantProcessor,
}

impl ReportRunner {
    pub fn new(
        store: Arc<dyn TenantStore>,
        api: Arc<dyn EngagementApi>,
        sink: Arc<dyn ReportSink>,
        config: &PipelineConfig,
    ) -> Self {
        let processor = TenantProcessor::new(Arc::clone(&api), config);
        Self {
            store,
            api,
            sink,
            processor,
        }
    }

    /// Generate a consolidated report for the selected tenants and window.
    ///
    /// Only validation, credential-store, and sink failures surface as
    /// errors; upstream outages degrade to a partial (possibly empty)
    /// report.
    pub async fn generate(&self, request: &ReportRequest) -> Result<ReportSummary, ReportError> {
        let result = self.generate_inner(request).await;

        let label = match &result {
            Ok(_) => "success",
            Err(e) if e.is_validation() => "invalid",
            Err(_) => "error",
        };
        metrics::REPORTS_GENERATED.with_label_values(&[label]).inc();

        result
    }

    async fn generate_inner(
        &self,
        request: &ReportRequest,
    ) -> Result<ReportSummary, ReportError> {
        // Validation is fatal and happens before any network activity.
        if request.tenants.is_empty() {
            return Err(ReportError::NoTenantsSelected);
        }
        let start = request
            .start_date
            .as_deref()
            .ok_or_else(|| ReportError::InvalidWindow("start date is required".to_string()))?;
        let end = request
            .end_date
            .as_deref()
            .ok_or_else(|| ReportError::InvalidWindow("end date is required".to_string()))?;
        let window =
            ReportWindow::parse(start, end).map_err(|e| ReportError::InvalidWindow(e.to_string()))?;

        let known = self.store.list_tenants().await?;
        let selected: Vec<&Tenant> = request
            .tenants
            .iter()
            .filter_map(|id| {
                let tenant = known.iter().find(|t| &t.id == id);
                if tenant.is_none() {
                    warn!(tenant = %id, "unknown tenant identifier, skipping");
                }
                tenant
            })
            .collect();

        info!(
            selected = selected.len(),
            start = %window.start,
            end = %window.end,
            "generating report"
        );

        let contributions = future::join_all(
            selected
                .iter()
                .map(|tenant| self.processor.process(tenant, &window)),
        )
        .await;

        // Every tenant future has completed; merging is single-task from
        // here on.
        let mut report = AggregatedReport::default();
        for contribution in contributions {
            report.rows.extend(contribution.rows);
            for (email, count) in contribution.counts {
                *report.counts_by_prospect.entry(email).or_insert(0) += count;
            }
        }

        if report.rows.is_empty() {
            info!("nothing to report for the requested window");
        } else {
            self.sink.write(&report.rows).await?;
        }

        metrics::REPORT_ROWS.observe(report.rows.len() as f64);
        metrics::REPORT_TENANTS.observe(selected.len() as f64);

        info!(
            rows = report.rows.len(),
            tenants = selected.len(),
            "report complete"
        );

        Ok(ReportSummary {
            success: true,
            total_openings: report.rows.len(),
            counts_by_email: report.counts_by_prospect,
            processed_tenants: selected.len(),
        })
    }

    /// List every known tenant with its current campaign count.
    ///
    /// Counting requires a token per tenant; failures are isolated and show
    /// up as a zero count rather than failing the listing.
    pub async fn list_selectable_tenants(&self) -> Result<Vec<SelectableTenant>, ReportError> {
        let known = self.store.list_tenants().await?;

        let listings = known.iter().map(|tenant| async {
            let campaign_count =
                isolate("tenant", &tenant.report_email, self.count_campaigns(tenant)).await;
            SelectableTenant {
                identity: tenant.id.clone(),
                campaign_count,
            }
        });

        Ok(future::join_all(listings).await)
    }

    async fn count_campaigns(&self, tenant: &Tenant) -> Result<usize, EngagementError> {
        let token = self
            .api
            .acquire_token(&tenant.client_id, &tenant.client_secret)
            .await?;
        Ok(self.api.list_campaigns(&token).await?.len())
    }

    /// Where the last-written report lives, for download.
    pub fn report_location(&self) -> PathBuf {
        self.sink.location()
    }
}
