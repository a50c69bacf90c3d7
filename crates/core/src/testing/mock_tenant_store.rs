//! Mock tenant store for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::tenants::{Tenant, TenantStore, TenantStoreError};

/// Mock implementation of the TenantStore trait.
pub struct MockTenantStore {
    tenants: Arc<RwLock<Vec<Tenant>>>,
    fail: Arc<RwLock<bool>>,
}

impl Default for MockTenantStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTenantStore {
    pub fn new() -> Self {
        Self {
            tenants: Arc::new(RwLock::new(Vec::new())),
            fail: Arc::new(RwLock::new(false)),
        }
    }

    /// Create a store preloaded with tenants.
    pub fn with_tenants(tenants: Vec<Tenant>) -> Self {
        Self {
            tenants: Arc::new(RwLock::new(tenants)),
            fail: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn set_tenants(&self, tenants: Vec<Tenant>) {
        *self.tenants.write().await = tenants;
    }

    /// Make every listing fail until cleared.
    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }
}

#[async_trait]
impl TenantStore for MockTenantStore {
    async fn list_tenants(&self) -> Result<Vec<Tenant>, TenantStoreError> {
        if *self.fail.read().await {
            return Err(TenantStoreError::ConnectionFailed(
                "simulated store outage".to_string(),
            ));
        }
        Ok(self.tenants.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_listing_and_failure() {
        let store = MockTenantStore::with_tenants(vec![fixtures::tenant("a")]);
        assert_eq!(store.list_tenants().await.unwrap().len(), 1);

        store.set_fail(true).await;
        assert!(store.list_tenants().await.is_err());

        store.set_fail(false).await;
        assert!(store.list_tenants().await.is_ok());
    }
}
