//! Snov.io engagement API client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::EngagementConfig;
use crate::metrics;

use super::parse::{campaigns_from_analytics, campaigns_from_basic};
use super::rate_limiter::RateLimiter;
use super::types::{AccessToken, Campaign, EngagementApi, EngagementError, RawOpenEvent};

/// Snov.io implementation of the engagement API.
///
/// Every outbound call passes through one shared [`RateLimiter`], on top of
/// the per-request timeout configured on the HTTP client.
pub struct SnovClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl SnovClient {
    /// Create a new client from configuration.
    pub fn new(config: EngagementConfig) -> Result<Self, EngagementError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| EngagementError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            rate_limiter: RateLimiter::new(Duration::from_millis(config.call_spacing_ms)),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Rate-limited authorized GET returning the decoded JSON body.
    async fn get_json(
        &self,
        url: &str,
        token: &AccessToken,
        query: &[(&str, &str)],
    ) -> Result<Value, EngagementError> {
        self.rate_limiter.acquire().await;

        let response = self
            .client
            .get(url)
            .bearer_auth(token.secret())
            .query(query)
            .send()
            .await
            .map_err(map_transport)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngagementError::Transport(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| EngagementError::Transport(format!("failed to decode body: {}", e)))
    }

    /// Richer analytics listing. The response shape is not contractual, so
    /// parsing happens against a raw JSON value.
    async fn analytics_campaigns(&self, token: &AccessToken) -> Result<Vec<Campaign>, String> {
        let payload = self
            .get_json(&self.endpoint("/v1/get-campaigns-analytics"), token, &[])
            .await
            .map_err(|e| e.to_string())?;

        campaigns_from_analytics(&payload)
            .ok_or_else(|| "no campaign array in analytics response".to_string())
    }

    /// Basic listing, guaranteed to be an `{id, name}` array.
    async fn basic_campaigns(&self, token: &AccessToken) -> Result<Vec<Campaign>, String> {
        let payload = self
            .get_json(&self.endpoint("/v1/get-user-campaigns"), token, &[])
            .await
            .map_err(|e| e.to_string())?;

        campaigns_from_basic(&payload)
            .ok_or_else(|| "basic campaigns response is not an array".to_string())
    }
}

#[async_trait]
impl EngagementApi for SnovClient {
    fn name(&self) -> &str {
        "snov"
    }

    async fn acquire_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessToken, EngagementError> {
        let started = Instant::now();
        self.rate_limiter.acquire().await;

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ];

        let result = async {
            let response = self
                .client
                .post(self.endpoint("/v1/oauth/access_token"))
                .form(&params)
                .send()
                .await
                .map_err(map_transport)?;

            if !response.status().is_success() {
                return Err(EngagementError::Auth {
                    client_id_hint: client_id_hint(client_id),
                    reason: format!("HTTP {}", response.status()),
                });
            }

            let body: TokenResponse = response.json().await.map_err(|e| {
                EngagementError::Transport(format!("failed to decode token response: {}", e))
            })?;

            match body.access_token {
                Some(token) if !token.is_empty() => Ok(AccessToken::new(token)),
                _ => Err(EngagementError::Auth {
                    client_id_hint: client_id_hint(client_id),
                    reason: "response carried no access token".to_string(),
                }),
            }
        }
        .await;

        record("token", started, result.is_ok());
        result
    }

    async fn list_campaigns(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<Campaign>, EngagementError> {
        let started = Instant::now();

        let result = match self.analytics_campaigns(token).await {
            Ok(campaigns) => {
                debug!(count = campaigns.len(), "analytics campaign listing complete");
                Ok(campaigns)
            }
            Err(analytics_err) => {
                warn!(
                    error = %analytics_err,
                    "analytics campaign listing failed, falling back to basic endpoint"
                );
                match self.basic_campaigns(token).await {
                    Ok(campaigns) => {
                        debug!(count = campaigns.len(), "basic campaign listing complete");
                        Ok(campaigns)
                    }
                    Err(basic_err) => Err(EngagementError::CampaignDiscovery(format!(
                        "analytics tier: {}; basic tier: {}",
                        analytics_err, basic_err
                    ))),
                }
            }
        };

        record("campaigns", started, result.is_ok());
        result
    }

    async fn fetch_opens(
        &self,
        token: &AccessToken,
        campaign_id: &str,
    ) -> Result<Vec<RawOpenEvent>, EngagementError> {
        let started = Instant::now();

        let result = self
            .get_json(
                &self.endpoint("/v1/get-emails-opened"),
                token,
                &[("campaignId", campaign_id)],
            )
            .await
            .map_err(|e| EngagementError::Fetch {
                campaign_id: campaign_id.to_string(),
                reason: e.to_string(),
            });

        let result = result.map(|payload| match payload.as_array() {
            Some(items) => items.iter().map(raw_event_from_value).collect(),
            None => {
                debug!(campaign_id, "non-array opens response, treating as empty");
                Vec::new()
            }
        });

        record("opens", started, result.is_ok());
        result
    }
}

/// First few characters of the credential id, enough to tell tenants apart
/// in diagnostics without exposing the credential.
fn client_id_hint(client_id: &str) -> String {
    client_id.chars().take(6).collect()
}

fn map_transport(e: reqwest::Error) -> EngagementError {
    if e.is_timeout() {
        EngagementError::Timeout
    } else {
        EngagementError::Transport(e.to_string())
    }
}

fn record(operation: &str, started: Instant, ok: bool) {
    let status = if ok { "success" } else { "error" };
    metrics::ENGAGEMENT_REQUESTS
        .with_label_values(&[operation, status])
        .inc();
    metrics::ENGAGEMENT_REQUEST_DURATION
        .with_label_values(&[operation])
        .observe(started.elapsed().as_secs_f64());
}

/// Extract one raw event from a response element. Missing fields become
/// empty strings; unparseable timestamps are dropped later during
/// normalization.
fn raw_event_from_value(item: &Value) -> RawOpenEvent {
    RawOpenEvent {
        prospect_email: string_field(item, "prospectEmail"),
        source_page: string_field(item, "sourcePage"),
        visited_at_raw: match item.get("visitedAt") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        },
    }
}

fn string_field(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

// Snov.io API response types
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}
