//! Test infrastructure: scripted capability doubles and store constructors.
//!
//! Everything here is `cfg(test)`-only, shared by the unit tests and the
//! integration scenarios.

use std::sync::Arc;

use anyhow::bail;
use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::StoreConfig;
use crate::providers::{default_catalog, InMemoryLedger, MockAuthProvider};
use crate::store::SessionStore;
use crate::traits::{AuthProvider, RewardsLedger, UserIdentity};
use crate::types::Reward;

/// Auth provider that rejects everything.
pub struct FailingAuth;

#[async_trait]
impl AuthProvider for FailingAuth {
    async fn authenticate(&self, _email: &str, _password: &str) -> anyhow::Result<UserIdentity> {
        bail!("invalid credentials")
    }
}

/// A recorded call to [`CountingLedger::record_redemption`].
#[derive(Debug, Clone)]
pub struct RedemptionCall {
    pub user_id: String,
    pub reward_id: String,
    pub request_id: String,
}

/// Ledger double that logs every call and can be scripted to fail.
pub struct CountingLedger {
    fail: bool,
    call_log: Mutex<Vec<RedemptionCall>>,
}

impl CountingLedger {
    pub fn new(fail: bool) -> Self {
        Self {
            fail,
            call_log: Mutex::new(Vec::new()),
        }
    }

    pub async fn calls(&self) -> Vec<RedemptionCall> {
        self.call_log.lock().await.clone()
    }
}

#[async_trait]
impl RewardsLedger for CountingLedger {
    async fn load_catalog(&self) -> anyhow::Result<Vec<Reward>> {
        Ok(default_catalog())
    }

    async fn record_redemption(
        &self,
        user_id: &str,
        reward_id: &str,
        request_id: &str,
    ) -> anyhow::Result<()> {
        if self.fail {
            bail!("ledger unavailable")
        }
        self.call_log.lock().await.push(RedemptionCall {
            user_id: user_id.to_string(),
            reward_id: reward_id.to_string(),
            request_id: request_id.to_string(),
        });
        Ok(())
    }
}

/// A store wired to the in-memory mock backend with default config.
pub async fn test_store() -> SessionStore {
    SessionStore::new(
        StoreConfig::default(),
        Arc::new(MockAuthProvider::new()),
        Arc::new(InMemoryLedger::new()),
    )
    .await
    .expect("test store should build")
}

/// A store wired to a [`CountingLedger`], returned alongside it so tests
/// can inspect the call log.
pub async fn store_with_ledger(fail: bool) -> (SessionStore, Arc<CountingLedger>) {
    let ledger = Arc::new(CountingLedger::new(fail));
    let store = SessionStore::new(
        StoreConfig::default(),
        Arc::new(MockAuthProvider::new()),
        ledger.clone(),
    )
    .await
    .expect("test store should build");
    (store, ledger)
}

/// A store whose auth provider rejects every credential pair.
pub async fn store_with_failing_auth() -> SessionStore {
    SessionStore::new(
        StoreConfig::default(),
        Arc::new(FailingAuth),
        Arc::new(InMemoryLedger::new()),
    )
    .await
    .expect("test store should build")
}
