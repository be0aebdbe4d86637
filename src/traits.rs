//! Capability seams for identity and reward persistence.
//!
//! The store talks to the outside world only through these traits, so a
//! real identity provider or claims backend can be substituted without
//! touching the store contract. In-memory implementations live in
//! [`crate::providers`].

use async_trait::async_trait;

use crate::types::Reward;

/// Identity returned by an [`AuthProvider`] on successful sign-in.
#[derive(Debug, Clone)]
pub struct UserIdentity {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Identity verification.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify credentials and return the member's identity.
    async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<UserIdentity>;
}

/// Reward catalog source and redemption record.
#[async_trait]
pub trait RewardsLedger: Send + Sync {
    /// Load the static reward catalog.
    async fn load_catalog(&self) -> anyhow::Result<Vec<Reward>>;

    /// Record a redemption.
    ///
    /// Must be idempotent on `request_id`: a retried record with the same
    /// id must not redeem twice. The store generates one id per redemption
    /// attempt, so a networked implementation can safely retry transport
    /// failures.
    async fn record_redemption(
        &self,
        user_id: &str,
        reward_id: &str,
        request_id: &str,
    ) -> anyhow::Result<()>;
}
