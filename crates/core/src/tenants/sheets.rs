//! Google Sheets backed tenant store.
//!
//! Tenants live in a spreadsheet, one per row:
//! account email, credential id, credential secret, reporting email,
//! preceded by an ignored first column and a header row.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::TenantsConfig;

use super::types::{Tenant, TenantStore, TenantStoreError};

const DEFAULT_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Tenant store reading the Sheets `values.get` REST endpoint.
pub struct SheetsTenantStore {
    client: Client,
    base_url: String,
    spreadsheet_id: String,
    range: String,
    api_key: String,
}

impl SheetsTenantStore {
    /// Create a new store from configuration.
    pub fn new(config: TenantsConfig) -> Result<Self, TenantStoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TenantStoreError::ConnectionFailed(e.to_string()))?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: config.spreadsheet_id,
            range: config.range,
            api_key: config.api_key,
        })
    }

    fn values_url(&self) -> String {
        format!(
            "{}/{}/values/{}",
            self.base_url, self.spreadsheet_id, self.range
        )
    }
}

#[async_trait]
impl TenantStore for SheetsTenantStore {
    async fn list_tenants(&self) -> Result<Vec<Tenant>, TenantStoreError> {
        let response = self
            .client
            .get(self.values_url())
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| TenantStoreError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TenantStoreError::ConnectionFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let body: ValuesResponse = response
            .json()
            .await
            .map_err(|e| TenantStoreError::Malformed(e.to_string()))?;

        let tenants = tenants_from_rows(&body.values);
        debug!(count = tenants.len(), "loaded tenants from sheet");
        Ok(tenants)
    }
}

/// Map sheet rows to tenants, skipping the header row and any row missing a
/// required field.
fn tenants_from_rows(rows: &[Vec<String>]) -> Vec<Tenant> {
    rows.iter()
        .skip(1)
        .filter_map(|row| {
            let id = cell(row, 1);
            let client_id = cell(row, 2);
            let client_secret = cell(row, 3);
            let report_email = cell(row, 4);

            if id.is_empty() || client_id.is_empty() || client_secret.is_empty()
                || report_email.is_empty()
            {
                warn!(account = %id, "skipping tenant row with incomplete credentials");
                return None;
            }

            Some(Tenant {
                id,
                client_id,
                client_secret,
                report_email,
            })
        })
        .collect()
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index).map(|v| v.trim().to_string()).unwrap_or_default()
}

// Sheets API response types
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}
