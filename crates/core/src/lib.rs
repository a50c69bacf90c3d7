pub mod config;
pub mod engagement;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod tenants;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, EngagementConfig,
    PipelineConfig, ReportConfig, SanitizedConfig, ServerConfig, TenantsConfig,
};
pub use engagement::{
    AccessToken, Campaign, EngagementApi, EngagementError, RateLimiter, RawOpenEvent, SnovClient,
};
pub use pipeline::{
    BatchScheduler, ReportError, ReportRequest, ReportRunner, TenantProcessor, TenantReport,
};
pub use report::{
    AggregatedReport, CsvReportSink, OpenEvent, ReportRow, ReportSink, ReportSummary,
    ReportWindow, SelectableTenant, SinkError,
};
pub use tenants::{SheetsTenantStore, Tenant, TenantStore, TenantStoreError};
