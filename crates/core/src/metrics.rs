//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Engagement API calls (counts, durations)
//! - Report generation outcomes (result, row and tenant volumes)

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts};

/// Engagement API requests total by operation and status.
pub static ENGAGEMENT_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "aperta_engagement_requests_total",
            "Total engagement API requests",
        ),
        &["operation", "status"], // operation: "token", "campaigns", "opens"
    )
    .unwrap()
});

/// Engagement API request duration in seconds.
pub static ENGAGEMENT_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "aperta_engagement_request_duration_seconds",
            "Duration of engagement API requests",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["operation"],
    )
    .unwrap()
});

/// Report generation attempts by result.
pub static REPORTS_GENERATED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "aperta_reports_generated_total",
            "Total report generation requests",
        ),
        &["result"], // "success", "invalid", "error"
    )
    .unwrap()
});

/// Rows per generated report.
pub static REPORT_ROWS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("aperta_report_rows", "Rows per generated report")
            .buckets(vec![0.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0]),
    )
    .unwrap()
});

/// Tenants dispatched per generated report.
pub static REPORT_TENANTS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("aperta_report_tenants", "Tenants dispatched per report")
            .buckets(vec![1.0, 2.0, 5.0, 10.0, 25.0, 50.0]),
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(ENGAGEMENT_REQUESTS.clone()),
        Box::new(ENGAGEMENT_REQUEST_DURATION.clone()),
        Box::new(REPORTS_GENERATED.clone()),
        Box::new(REPORT_ROWS.clone()),
        Box::new(REPORT_TENANTS.clone()),
    ]
}
