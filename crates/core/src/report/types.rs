//! Report row and summary types.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::window::format_display;

/// One normalized open event, already filtered to the report window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenEvent {
    pub campaign_id: String,
    pub campaign_name: String,
    pub prospect_email: String,
    pub source_page: String,
    /// Calendar day the open happened, in the reporting timezone.
    pub visited_at: NaiveDate,
}

/// One row of the consolidated report: a normalized event attributed to the
/// tenant's reporting identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub client_email: String,
    pub campaign_id: String,
    pub campaign: String,
    pub prospect_email: String,
    pub source_page: String,
    /// Display-rendered open date (dd-mm-yyyy).
    pub visited_at: String,
}

impl ReportRow {
    pub fn new(client_email: &str, event: OpenEvent) -> Self {
        Self {
            client_email: client_email.to_string(),
            campaign_id: event.campaign_id,
            campaign: event.campaign_name,
            prospect_email: event.prospect_email,
            source_page: event.source_page,
            visited_at: format_display(event.visited_at),
        }
    }
}

/// The merged cross-tenant result. Row order is completion order and
/// carries no meaning; only the multiset and the counts are deterministic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AggregatedReport {
    pub rows: Vec<ReportRow>,
    pub counts_by_prospect: HashMap<String, u64>,
}

/// Caller-visible outcome of one report generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub success: bool,
    pub total_openings: usize,
    pub counts_by_email: HashMap<String, u64>,
    /// Tenants actually dispatched (resolved against the store), regardless
    /// of whether each produced rows.
    pub processed_tenants: usize,
}

/// A tenant as offered for selection, with its last known campaign count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectableTenant {
    pub identity: String,
    pub campaign_count: usize,
}
