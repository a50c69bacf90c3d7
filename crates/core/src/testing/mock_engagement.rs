//! Mock engagement API for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

use crate::engagement::{
    AccessToken, Campaign, EngagementApi, EngagementError, RawOpenEvent,
};

const TOKEN_PREFIX: &str = "token-";

/// A recorded API call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// "token", "campaigns", or "opens".
    pub operation: String,
    /// Client id for token/campaigns calls, campaign id for opens calls.
    pub subject: String,
    /// When the call was made.
    pub timestamp: Instant,
}

/// Mock implementation of the EngagementApi trait.
///
/// Provides controllable behavior for testing:
/// - Configure campaigns per client and open events per campaign
/// - Inject failures at the auth, discovery, or fetch step
/// - Track every call with a timestamp for assertions
///
/// Tokens are `token-<client_id>` so later calls can be attributed back to
/// the tenant that acquired them.
#[derive(Default)]
pub struct MockEngagementApi {
    /// Campaigns per client id.
    campaigns: Arc<RwLock<HashMap<String, Vec<Campaign>>>>,
    /// Raw open events per campaign id.
    opens: Arc<RwLock<HashMap<String, Vec<RawOpenEvent>>>>,
    /// Client ids whose credential exchange fails.
    failing_auth: Arc<RwLock<HashSet<String>>>,
    /// Client ids whose campaign discovery fails.
    failing_discovery: Arc<RwLock<HashSet<String>>>,
    /// Campaign ids whose event fetch fails.
    failing_campaigns: Arc<RwLock<HashSet<String>>>,
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedCall>>>,
}

impl MockEngagementApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the campaigns returned for a client.
    pub async fn set_campaigns(&self, client_id: &str, campaigns: Vec<Campaign>) {
        self.campaigns
            .write()
            .await
            .insert(client_id.to_string(), campaigns);
    }

    /// Set the raw open events returned for a campaign.
    pub async fn set_opens(&self, campaign_id: &str, events: Vec<RawOpenEvent>) {
        self.opens
            .write()
            .await
            .insert(campaign_id.to_string(), events);
    }

    /// Make the credential exchange fail for a client.
    pub async fn fail_auth(&self, client_id: &str) {
        self.failing_auth.write().await.insert(client_id.to_string());
    }

    /// Make campaign discovery fail for a client.
    pub async fn fail_discovery(&self, client_id: &str) {
        self.failing_discovery
            .write()
            .await
            .insert(client_id.to_string());
    }

    /// Make the event fetch fail for a campaign.
    pub async fn fail_campaign(&self, campaign_id: &str) {
        self.failing_campaigns
            .write()
            .await
            .insert(campaign_id.to_string());
    }

    /// All recorded calls in order.
    pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.calls.read().await.clone()
    }

    /// Recorded calls for one operation.
    pub async fn calls_for(&self, operation: &str) -> Vec<RecordedCall> {
        self.calls
            .read()
            .await
            .iter()
            .filter(|c| c.operation == operation)
            .cloned()
            .collect()
    }

    async fn record(&self, operation: &str, subject: &str) {
        self.calls.write().await.push(RecordedCall {
            operation: operation.to_string(),
            subject: subject.to_string(),
            timestamp: Instant::now(),
        });
    }

    fn client_id_of(token: &AccessToken) -> String {
        token
            .secret()
            .strip_prefix(TOKEN_PREFIX)
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl EngagementApi for MockEngagementApi {
    fn name(&self) -> &str {
        "mock"
    }

    async fn acquire_token(
        &self,
        client_id: &str,
        _client_secret: &str,
    ) -> Result<AccessToken, EngagementError> {
        self.record("token", client_id).await;

        if self.failing_auth.read().await.contains(client_id) {
            return Err(EngagementError::Auth {
                client_id_hint: client_id.chars().take(6).collect(),
                reason: "simulated exchange failure".to_string(),
            });
        }

        Ok(AccessToken::new(format!("{}{}", TOKEN_PREFIX, client_id)))
    }

    async fn list_campaigns(
        &self,
        token: &AccessToken,
    ) -> Result<Vec<Campaign>, EngagementError> {
        let client_id = Self::client_id_of(token);
        self.record("campaigns", &client_id).await;

        if self.failing_discovery.read().await.contains(&client_id) {
            return Err(EngagementError::CampaignDiscovery(
                "simulated discovery failure".to_string(),
            ));
        }

        Ok(self
            .campaigns
            .read()
            .await
            .get(&client_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_opens(
        &self,
        _token: &AccessToken,
        campaign_id: &str,
    ) -> Result<Vec<RawOpenEvent>, EngagementError> {
        self.record("opens", campaign_id).await;

        if self.failing_campaigns.read().await.contains(campaign_id) {
            return Err(EngagementError::Fetch {
                campaign_id: campaign_id.to_string(),
                reason: "simulated fetch timeout".to_string(),
            });
        }

        Ok(self
            .opens
            .read()
            .await
            .get(campaign_id)
            .cloned()
            .unwrap_or_default())
    }
}
