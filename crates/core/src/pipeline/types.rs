//! Types for the aggregation pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::report::{ReportRow, SinkError};
use crate::tenants::TenantStoreError;

/// One report-generation request as received from the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Identifiers of the tenants to include.
    pub tenants: Vec<String>,
    /// Window start in day/month/year text. Required.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Window end in day/month/year text. Required.
    #[serde(default)]
    pub end_date: Option<String>,
}

/// One tenant's contribution: attributed rows plus per-prospect counts for
/// this tenant only. Empty on any tenant-level failure.
#[derive(Debug, Clone, Default)]
pub struct TenantReport {
    pub rows: Vec<ReportRow>,
    pub counts: HashMap<String, u64>,
}

/// Errors that fail a whole report request.
///
/// Everything else (auth, discovery, fetch failures) is isolated at the
/// tenant or campaign boundary and never reaches the caller.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no tenants selected")]
    NoTenantsSelected,

    #[error("invalid report window: {0}")]
    InvalidWindow(String),

    #[error("credential store failure: {0}")]
    TenantStore(#[from] TenantStoreError),

    #[error("report sink failure: {0}")]
    Sink(#[from] SinkError),
}

impl ReportError {
    /// Whether this is a caller mistake rather than an upstream failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ReportError::NoTenantsSelected | ReportError::InvalidWindow(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_request_optional_bounds() {
        let json = r#"{"tenants": ["a@x.com"]}"#;
        let request: ReportRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.tenants, vec!["a@x.com".to_string()]);
        assert!(request.start_date.is_none());
        assert!(request.end_date.is_none());
    }

    #[test]
    fn test_error_classification() {
        assert!(ReportError::NoTenantsSelected.is_validation());
        assert!(ReportError::InvalidWindow("bad".into()).is_validation());
        assert!(!ReportError::TenantStore(TenantStoreError::ConnectionFailed("x".into()))
            .is_validation());
    }
}
