//! The multi-tenant aggregation pipeline.
//!
//! `ReportRunner` fans out over tenants, each `TenantProcessor` fans out
//! over that tenant's campaigns through the `BatchScheduler`, and every
//! fallible unit of work is wrapped in [`isolate`] so one bad tenant or
//! campaign never takes out its siblings.

mod batch;
mod runner;
mod tenant;
mod types;

pub use batch::BatchScheduler;
pub use runner::ReportRunner;
pub use tenant::TenantProcessor;
pub use types::*;

use std::future::Future;

use tracing::warn;

use crate::engagement::EngagementError;

/// Run a fallible per-tenant or per-campaign operation, converting failure
/// into an empty contribution plus one diagnostic log line naming the
/// subject and the failing step.
pub(crate) async fn isolate<T, F>(scope: &'static str, subject: &str, op: F) -> T
where
    T: Default,
    F: Future<Output = Result<T, EngagementError>>,
{
    match op.await {
        Ok(value) => value,
        Err(e) => {
            warn!(
                scope,
                subject,
                step = e.step(),
                error = %e,
                "operation failed, contributing empty result"
            );
            T::default()
        }
    }
}
