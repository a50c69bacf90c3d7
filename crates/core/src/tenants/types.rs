//! Types for the tenant credential store.

use async_trait::async_trait;
use thiserror::Error;

/// One client account with its own engagement API credentials, reported
/// under one email identity. Immutable for the duration of a report run.
/// Deliberately not serializable: credentials never leave the process.
#[derive(Clone, PartialEq, Eq)]
pub struct Tenant {
    /// Opaque identifier used for selection (the account email column).
    pub id: String,
    /// Engagement API credential id.
    pub client_id: String,
    /// Engagement API credential secret. Never logged.
    pub client_secret: String,
    /// The identity every report row for this tenant is attributed to.
    pub report_email: String,
}

impl std::fmt::Debug for Tenant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tenant")
            .field("id", &self.id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("report_email", &self.report_email)
            .finish()
    }
}

/// Errors from the credential store.
#[derive(Debug, Error)]
pub enum TenantStoreError {
    #[error("credential store connection failed: {0}")]
    ConnectionFailed(String),

    #[error("credential store returned a malformed response: {0}")]
    Malformed(String),
}

/// Trait for tenant credential stores.
#[async_trait]
pub trait TenantStore: Send + Sync {
    /// List every tenant with complete credentials. Incomplete records are
    /// excluded by the store itself.
    async fn list_tenants(&self) -> Result<Vec<Tenant>, TenantStoreError>;
}
