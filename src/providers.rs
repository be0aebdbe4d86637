//! In-memory implementations of the capability seams.
//!
//! [`MockAuthProvider`] fabricates an identity for any credentials and
//! [`InMemoryLedger`] serves a built-in catalog, which is enough to run the
//! whole front-end without a backend. Production swaps these for real
//! implementations of [`AuthProvider`] / [`RewardsLedger`].

use std::collections::HashSet;

use anyhow::bail;
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::traits::{AuthProvider, RewardsLedger, UserIdentity};
use crate::types::{Reward, RewardCategory};

/// Mock identity provider. Accepts any non-empty credentials and fabricates
/// a member named "John Doe" with the given email.
#[derive(Default)]
pub struct MockAuthProvider;

impl MockAuthProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<UserIdentity> {
        if email.trim().is_empty() || password.is_empty() {
            bail!("email and password are required");
        }
        Ok(UserIdentity {
            id: uuid::Uuid::new_v4().to_string(),
            name: "John Doe".to_string(),
            email: email.to_string(),
        })
    }
}

/// A redemption the ledger has recorded.
#[derive(Debug, Clone)]
pub struct RedemptionRecord {
    pub user_id: String,
    pub reward_id: String,
    pub request_id: String,
}

/// In-memory rewards ledger with a built-in catalog.
///
/// Remembers every request id it has seen so a retried
/// [`record_redemption`](RewardsLedger::record_redemption) is a no-op.
pub struct InMemoryLedger {
    catalog: Vec<Reward>,
    redemptions: Mutex<Vec<RedemptionRecord>>,
    seen_requests: Mutex<HashSet<String>>,
}

impl InMemoryLedger {
    /// Ledger with the default catalog.
    pub fn new() -> Self {
        Self::with_catalog(default_catalog())
    }

    /// Ledger serving a caller-supplied catalog.
    pub fn with_catalog(catalog: Vec<Reward>) -> Self {
        Self {
            catalog,
            redemptions: Mutex::new(Vec::new()),
            seen_requests: Mutex::new(HashSet::new()),
        }
    }

    /// Redemptions recorded so far (deduplicated by request id).
    pub async fn redemptions(&self) -> Vec<RedemptionRecord> {
        self.redemptions.lock().await.clone()
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RewardsLedger for InMemoryLedger {
    async fn load_catalog(&self) -> anyhow::Result<Vec<Reward>> {
        Ok(self.catalog.clone())
    }

    async fn record_redemption(
        &self,
        user_id: &str,
        reward_id: &str,
        request_id: &str,
    ) -> anyhow::Result<()> {
        let mut seen = self.seen_requests.lock().await;
        if !seen.insert(request_id.to_string()) {
            debug!("Duplicate redemption request {} ignored", request_id);
            return Ok(());
        }
        self.redemptions.lock().await.push(RedemptionRecord {
            user_id: user_id.to_string(),
            reward_id: reward_id.to_string(),
            request_id: request_id.to_string(),
        });
        Ok(())
    }
}

fn reward(
    id: &str,
    name: &str,
    description: &str,
    points_cost: u64,
    category: RewardCategory,
) -> Reward {
    Reward {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        points_cost,
        category,
        image_url: None,
    }
}

/// The built-in reward catalog, one or two entries per category.
pub fn default_catalog() -> Vec<Reward> {
    vec![
        reward(
            "gift-card-10",
            "$10 Gift Card",
            "Digital gift card for popular retailers",
            1000,
            RewardCategory::GiftCards,
        ),
        reward(
            "gift-card-25",
            "$25 Gift Card",
            "Digital gift card for popular retailers",
            2500,
            RewardCategory::GiftCards,
        ),
        reward(
            "vitamin-pack",
            "Monthly Vitamin Pack",
            "A month's supply of daily multivitamins",
            800,
            RewardCategory::Health,
        ),
        reward(
            "gym-month",
            "Gym Membership Month",
            "One month at a participating gym",
            3000,
            RewardCategory::Fitness,
        ),
        reward(
            "massage-session",
            "Massage Session",
            "A 60-minute session at a partner spa",
            2000,
            RewardCategory::Wellness,
        ),
        reward(
            "water-bottle",
            "Insulated Water Bottle",
            "Program-branded 750ml bottle",
            500,
            RewardCategory::Merchandise,
        ),
    ]
}
