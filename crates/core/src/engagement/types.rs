//! Types for the engagement API boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A tenant-scoped bearer token, valid for the duration of one report run.
///
/// The inner string never appears in Debug output or logs.
#[derive(Clone)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// The raw token, for building the Authorization header.
    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// A campaign owned by a tenant.
///
/// `id` is always non-empty: upstream elements without a resolvable id are
/// dropped or defaulted at the parse boundary, never propagated empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    pub name: String,
}

/// An open event as received from the API, before window filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOpenEvent {
    pub prospect_email: String,
    pub source_page: String,
    /// Timestamp in whatever format the API produced; parsed during
    /// normalization, unparseable values drop the event.
    pub visited_at_raw: String,
}

/// Errors from the engagement API client.
#[derive(Debug, Error)]
pub enum EngagementError {
    /// The exchange succeeded at the transport level but carried no usable
    /// token. Only a short prefix of the credential id is included.
    #[error("credential exchange rejected for client '{client_id_hint}…': {reason}")]
    Auth {
        client_id_hint: String,
        reason: String,
    },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    /// Both discovery tiers failed. Tenant-fatal, never pipeline-fatal.
    #[error("campaign discovery failed: {0}")]
    CampaignDiscovery(String),

    /// One campaign's event fetch failed. Campaign-fatal only.
    #[error("event fetch failed for campaign {campaign_id}: {reason}")]
    Fetch {
        campaign_id: String,
        reason: String,
    },
}

impl EngagementError {
    /// Which pipeline step this error belongs to, for diagnostics.
    pub fn step(&self) -> &'static str {
        match self {
            EngagementError::Auth { .. } => "auth",
            EngagementError::Transport(_) | EngagementError::Timeout => "transport",
            EngagementError::CampaignDiscovery(_) => "discovery",
            EngagementError::Fetch { .. } => "fetch",
        }
    }
}

/// Trait for engagement API backends.
#[async_trait]
pub trait EngagementApi: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Exchange tenant credentials for a short-lived access token.
    /// One network exchange, never retried.
    async fn acquire_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessToken, EngagementError>;

    /// Resolve the campaigns owned by the token's tenant.
    async fn list_campaigns(&self, token: &AccessToken)
        -> Result<Vec<Campaign>, EngagementError>;

    /// Fetch raw open events for one campaign. A non-array response is an
    /// empty result, not an error.
    async fn fetch_opens(
        &self,
        token: &AccessToken,
        campaign_id: &str,
    ) -> Result<Vec<RawOpenEvent>, EngagementError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("very-secret-token".to_string());
        let debug = format!("{:?}", token);
        assert!(!debug.contains("very-secret-token"));
        assert_eq!(debug, "AccessToken(***)");
        assert_eq!(token.secret(), "very-secret-token");
    }

    #[test]
    fn test_auth_error_display_has_only_hint() {
        let err = EngagementError::Auth {
            client_id_hint: "abc123".to_string(),
            reason: "no access_token in response".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("abc123"));
        assert!(msg.contains("no access_token"));
        assert_eq!(err.step(), "auth");
    }

    #[test]
    fn test_error_steps() {
        assert_eq!(EngagementError::Timeout.step(), "transport");
        assert_eq!(
            EngagementError::CampaignDiscovery("both tiers failed".into()).step(),
            "discovery"
        );
        assert_eq!(
            EngagementError::Fetch {
                campaign_id: "c1".into(),
                reason: "timeout".into()
            }
            .step(),
            "fetch"
        );
    }
}
