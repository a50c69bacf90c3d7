//! Test doubles and fixtures for pipeline testing.
//!
//! Compiled into the library so integration tests and downstream crates can
//! exercise the pipeline without network access.

pub mod fixtures;
mod mock_engagement;
mod mock_sink;
mod mock_tenant_store;

pub use mock_engagement::{MockEngagementApi, RecordedCall};
pub use mock_sink::MockReportSink;
pub use mock_tenant_store::MockTenantStore;
