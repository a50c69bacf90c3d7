use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub tenants: TenantsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engagement: EngagementConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    3000
}

/// Credential store (Google Sheets) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TenantsConfig {
    /// Spreadsheet holding one tenant per row.
    pub spreadsheet_id: String,
    /// Sheet range to read (default: "tenants").
    #[serde(default = "default_sheet_range")]
    pub range: String,
    /// Google Sheets API key.
    pub api_key: String,
    /// Base URL override, mainly for tests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

fn default_sheet_range() -> String {
    "tenants".to_string()
}

/// Engagement API (Snov.io) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngagementConfig {
    /// Base URL (default: https://api.snov.io).
    #[serde(default = "default_engagement_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds (default: 10).
    #[serde(default = "default_engagement_timeout")]
    pub timeout_secs: u32,
    /// Minimum spacing between outbound calls in milliseconds (default: 100).
    #[serde(default = "default_call_spacing")]
    pub call_spacing_ms: u64,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        Self {
            base_url: default_engagement_base_url(),
            timeout_secs: default_engagement_timeout(),
            call_spacing_ms: default_call_spacing(),
        }
    }
}

fn default_engagement_base_url() -> String {
    "https://api.snov.io".to_string()
}

fn default_engagement_timeout() -> u32 {
    10
}

fn default_call_spacing() -> u64 {
    100
}

/// Aggregation pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Campaigns fetched concurrently per group (default: 10).
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Pause between groups in milliseconds (default: 300).
    #[serde(default = "default_batch_pause")]
    pub batch_pause_ms: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_pause_ms: default_batch_pause(),
        }
    }
}

fn default_batch_size() -> usize {
    10
}

fn default_batch_pause() -> u64 {
    300
}

/// Report output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// Where the consolidated CSV is written.
    #[serde(default = "default_csv_path")]
    pub csv_path: PathBuf,
    /// Campaign count refresh interval in seconds (default: 1800).
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
            refresh_interval_secs: default_refresh_interval(),
        }
    }
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("campaign-opens.csv")
}

fn default_refresh_interval() -> u64 {
    1800
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub tenants: SanitizedTenantsConfig,
    pub engagement: EngagementConfig,
    pub pipeline: PipelineConfig,
    pub report: ReportConfig,
}

/// Sanitized credential store config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedTenantsConfig {
    pub spreadsheet_id: String,
    pub range: String,
    pub api_key_configured: bool,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            tenants: SanitizedTenantsConfig {
                spreadsheet_id: config.tenants.spreadsheet_id.clone(),
                range: config.tenants.range.clone(),
                api_key_configured: !config.tenants.api_key.is_empty(),
            },
            engagement: config.engagement.clone(),
            pipeline: config.pipeline.clone(),
            report: config.report.clone(),
        }
    }
}
