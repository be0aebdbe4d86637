//! The session state store.
//!
//! Owns the current signed-in member (or none), the reward catalog, and the
//! member's health goals. Screens read snapshots, call the operations here,
//! and re-render on [`StoreEvent`]s; they own no state themselves.
//!
//! All state sits behind one `tokio::sync::Mutex`, so every mutation is
//! applied in full before any reader can observe it. `sign_in` talks to the
//! identity provider *before* taking the lock, which gives concurrent
//! sign-ins last-write-wins semantics; `redeem_reward` holds the lock from
//! the sufficiency check through the decrement so concurrent redemptions
//! can never oversell points.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::SessionError;
use crate::events::{store_event_bus, StoreEvent, StoreEventReceiver, StoreEventSender};
use crate::seed;
use crate::traits::{AuthProvider, RewardsLedger};
use crate::types::{Activity, ActivityKind, HealthGoal, HealthMetrics, Reward, RewardCategory, User};

struct StoreState {
    current_user: Option<User>,
    rewards: Vec<Reward>,
    health_goals: Vec<HealthGoal>,
}

pub struct SessionStore {
    auth: Arc<dyn AuthProvider>,
    ledger: Arc<dyn RewardsLedger>,
    state: Mutex<StoreState>,
    events: StoreEventSender,
    config: StoreConfig,
}

impl SessionStore {
    /// Build a store wired to the given capability implementations. Loads
    /// the reward catalog from the ledger once, up front.
    pub async fn new(
        config: StoreConfig,
        auth: Arc<dyn AuthProvider>,
        ledger: Arc<dyn RewardsLedger>,
    ) -> anyhow::Result<Self> {
        let rewards = ledger.load_catalog().await?;
        info!("Loaded reward catalog ({} rewards)", rewards.len());
        let (events, _) = store_event_bus(config.event_capacity);
        Ok(Self {
            auth,
            ledger,
            state: Mutex::new(StoreState {
                current_user: None,
                rewards,
                health_goals: Vec::new(),
            }),
            events,
            config,
        })
    }

    // ==================== Session lifecycle ====================

    /// Sign a member in, replacing any existing session.
    ///
    /// The new session starts from the program baseline: configured
    /// starting balance, three seeded activities, a zero-claim plan.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, SessionError> {
        // Provider call happens outside the lock: a slow sign-in never
        // blocks other operations, and the last one to finish wins.
        let identity = self
            .auth
            .authenticate(email, password)
            .await
            .map_err(|e| SessionError::Authentication(e.to_string()))?;

        let user = User {
            id: identity.id,
            name: identity.name,
            email: identity.email,
            points: self.config.starting_points,
            insurance_plan: seed::default_plan(),
            health_metrics: seed::baseline_metrics(),
            recent_activities: seed::starter_activities(),
        };

        let mut state = self.state.lock().await;
        state.current_user = Some(user.clone());
        info!("Member {} signed in", user.email);
        self.publish(StoreEvent::SignedIn {
            user_id: user.id.clone(),
        });
        Ok(user)
    }

    /// Clear the current session. Idempotent: signing out while signed out
    /// is a no-op and publishes nothing.
    pub async fn sign_out(&self) {
        let mut state = self.state.lock().await;
        if let Some(user) = state.current_user.take() {
            info!("Member {} signed out", user.email);
            self.publish(StoreEvent::SignedOut);
        }
    }

    // ==================== Health metrics ====================

    /// Replace the member's health-metrics snapshot wholesale.
    pub async fn update_health_metrics(
        &self,
        metrics: HealthMetrics,
    ) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        let user = state
            .current_user
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;
        user.health_metrics = metrics;
        self.publish(StoreEvent::MetricsUpdated);
        Ok(())
    }

    // ==================== Points & rewards ====================

    /// Adjust the member's balance by a signed delta and return the new
    /// balance.
    ///
    /// Negative deltas (penalties, corrections) are accepted but fail with
    /// [`SessionError::InsufficientPoints`], mutating nothing, if they
    /// would drive the balance below zero.
    pub async fn add_points(&self, delta: i64) -> Result<u64, SessionError> {
        let mut state = self.state.lock().await;
        let user = state
            .current_user
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;

        let magnitude = delta.unsigned_abs();
        let balance = if delta >= 0 {
            user.points.saturating_add(magnitude)
        } else {
            user.points
                .checked_sub(magnitude)
                .ok_or(SessionError::InsufficientPoints {
                    needed: magnitude,
                    available: user.points,
                })?
        };
        user.points = balance;
        debug!("Balance adjusted by {} to {}", delta, balance);
        self.publish(StoreEvent::PointsChanged { balance });
        Ok(balance)
    }

    /// Record a new point-earning activity: prepends it to the history and
    /// credits its points in the same mutation.
    pub async fn record_activity(
        &self,
        kind: ActivityKind,
        points: u64,
        description: &str,
    ) -> Result<Activity, SessionError> {
        let mut state = self.state.lock().await;
        let user = state
            .current_user
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;

        let activity = Activity::new(kind, points, description);
        user.recent_activities.insert(0, activity.clone());
        user.points = user.points.saturating_add(points);
        let balance = user.points;
        info!("Activity recorded: {} (+{} points)", description, points);
        self.publish(StoreEvent::PointsChanged { balance });
        Ok(activity)
    }

    /// Redeem a reward, decrementing the balance by its cost.
    ///
    /// The sufficiency check, the ledger record, and the decrement all
    /// happen under one lock guard; a failure at any step leaves the
    /// balance untouched.
    pub async fn redeem_reward(&self, reward: &Reward) -> Result<(), SessionError> {
        let mut state = self.state.lock().await;
        let user = state
            .current_user
            .as_mut()
            .ok_or(SessionError::NoActiveSession)?;

        if user.points < reward.points_cost {
            return Err(SessionError::InsufficientPoints {
                needed: reward.points_cost,
                available: user.points,
            });
        }

        // One id per attempt; the ledger deduplicates retries on it.
        let request_id = uuid::Uuid::new_v4().to_string();
        self.ledger
            .record_redemption(&user.id, &reward.id, &request_id)
            .await
            .map_err(|e| SessionError::Ledger(e.to_string()))?;

        user.points -= reward.points_cost;
        let balance = user.points;
        info!(
            "Member {} redeemed '{}' for {} points ({} remaining)",
            user.email, reward.name, reward.points_cost, balance
        );
        self.publish(StoreEvent::PointsChanged { balance });
        Ok(())
    }

    // ==================== Health goals ====================

    /// Append a goal unconditionally. No deduplication by id.
    pub async fn add_health_goal(&self, goal: HealthGoal) {
        let mut state = self.state.lock().await;
        state.health_goals.push(goal);
        self.publish(StoreEvent::GoalsChanged);
    }

    /// Replace the goal whose id matches. Unknown ids are a silent no-op —
    /// never an append — and publish nothing.
    pub async fn update_health_goal(&self, goal: HealthGoal) {
        let mut state = self.state.lock().await;
        match state.health_goals.iter_mut().find(|g| g.id == goal.id) {
            Some(slot) => {
                *slot = goal;
                self.publish(StoreEvent::GoalsChanged);
            }
            None => {
                debug!("update_health_goal: no goal with id {}", goal.id);
            }
        }
    }

    // ==================== Snapshot reads ====================

    /// The signed-in member, if any. Never defaults: "no user" is `None`,
    /// not a zero-point placeholder.
    pub async fn current_user(&self) -> Option<User> {
        self.state.lock().await.current_user.clone()
    }

    pub async fn is_signed_in(&self) -> bool {
        self.state.lock().await.current_user.is_some()
    }

    /// The full reward catalog.
    pub async fn rewards(&self) -> Vec<Reward> {
        self.state.lock().await.rewards.clone()
    }

    /// Catalog filtered to one category, original order preserved.
    pub async fn rewards_in_category(&self, category: RewardCategory) -> Vec<Reward> {
        self.state
            .lock()
            .await
            .rewards
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect()
    }

    pub async fn health_goals(&self) -> Vec<HealthGoal> {
        self.state.lock().await.health_goals.clone()
    }

    /// Subscribe to mutation events. Each successful mutation publishes
    /// exactly one event; failed and no-op operations publish nothing.
    pub fn subscribe(&self) -> StoreEventReceiver {
        self.events.subscribe()
    }

    fn publish(&self, event: StoreEvent) {
        if self.events.send(event).is_err() {
            debug!("No store subscribers active");
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::testing::{store_with_ledger, test_store};
    use crate::types::GoalKind;

    fn reward_costing(points_cost: u64) -> Reward {
        Reward {
            id: format!("r-{}", points_cost),
            name: "Test Reward".to_string(),
            description: "A reward".to_string(),
            points_cost,
            category: RewardCategory::Wellness,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn redeem_succeeds_iff_balance_covers_cost() {
        let store = test_store().await;
        store.sign_in("a@x.com", "pw").await.unwrap();

        // Balance 2500, cost 2500: exact spend succeeds and zeroes out.
        store.redeem_reward(&reward_costing(2500)).await.unwrap();
        assert_eq!(store.current_user().await.unwrap().points, 0);

        // Cost 1 against balance 0: fails, balance unchanged.
        let err = store.redeem_reward(&reward_costing(1)).await.unwrap_err();
        assert_eq!(
            err,
            SessionError::InsufficientPoints {
                needed: 1,
                available: 0
            }
        );
        assert_eq!(store.current_user().await.unwrap().points, 0);
    }

    #[tokio::test]
    async fn redeem_without_session_errors() {
        let store = test_store().await;
        let err = store.redeem_reward(&reward_costing(1)).await.unwrap_err();
        assert_eq!(err, SessionError::NoActiveSession);
    }

    #[tokio::test]
    async fn add_points_rejects_overdraw() {
        let store = test_store().await;
        store.sign_in("a@x.com", "pw").await.unwrap();

        assert_eq!(store.add_points(500).await.unwrap(), 3000);
        assert_eq!(store.add_points(-1000).await.unwrap(), 2000);

        let err = store.add_points(-2001).await.unwrap_err();
        assert_eq!(
            err,
            SessionError::InsufficientPoints {
                needed: 2001,
                available: 2000
            }
        );
        assert_eq!(store.current_user().await.unwrap().points, 2000);
    }

    #[tokio::test]
    async fn record_activity_prepends_and_credits() {
        let store = test_store().await;
        store.sign_in("a@x.com", "pw").await.unwrap();

        let activity = store
            .record_activity(ActivityKind::Checkup, 300, "Annual Checkup")
            .await
            .unwrap();

        let user = store.current_user().await.unwrap();
        assert_eq!(user.points, 2800);
        assert_eq!(user.recent_activities.len(), 4);
        assert_eq!(user.recent_activities[0].id, activity.id);
    }

    #[tokio::test]
    async fn goal_update_replaces_in_place() {
        let store = test_store().await;
        let goal = HealthGoal::new(
            GoalKind::Steps,
            10_000.0,
            Utc::now() + Duration::days(30),
            500,
        );
        store.add_health_goal(goal.clone()).await;

        let mut updated = goal.clone();
        updated.current = 4200.0;
        store.update_health_goal(updated).await;

        let goals = store.health_goals().await;
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].current, 4200.0);
    }

    #[tokio::test]
    async fn goal_update_with_unknown_id_is_a_no_op() {
        let store = test_store().await;
        let goal = HealthGoal::new(
            GoalKind::Sleep,
            8.0,
            Utc::now() + Duration::days(7),
            200,
        );
        store.add_health_goal(goal.clone()).await;

        let stray = HealthGoal::new(
            GoalKind::Weight,
            70.0,
            Utc::now() + Duration::days(60),
            1000,
        );
        store.update_health_goal(stray).await;

        let goals = store.health_goals().await;
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].id, goal.id);
        assert_eq!(goals[0].kind, GoalKind::Sleep);
    }

    #[tokio::test]
    async fn duplicate_goal_ids_are_allowed_on_add() {
        let store = test_store().await;
        let goal = HealthGoal::new(
            GoalKind::Exercise,
            3.0,
            Utc::now() + Duration::days(7),
            150,
        );
        store.add_health_goal(goal.clone()).await;
        store.add_health_goal(goal).await;
        assert_eq!(store.health_goals().await.len(), 2);
    }

    #[tokio::test]
    async fn sign_out_is_idempotent() {
        let store = test_store().await;
        store.sign_out().await; // signed out already: no-op
        store.sign_in("a@x.com", "pw").await.unwrap();
        store.sign_out().await;
        assert!(!store.is_signed_in().await);
        store.sign_out().await; // still fine
    }

    #[tokio::test]
    async fn sign_in_replaces_existing_session() {
        let store = test_store().await;
        let first = store.sign_in("a@x.com", "pw").await.unwrap();
        store.add_points(100).await.unwrap();

        let second = store.sign_in("b@x.com", "pw").await.unwrap();
        let user = store.current_user().await.unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(user.email, "b@x.com");
        // Fresh baseline, not carried over from the first session.
        assert_eq!(user.points, 2500);
    }

    #[tokio::test]
    async fn ledger_failure_leaves_balance_untouched() {
        let (store, _ledger) = store_with_ledger(true).await;
        store.sign_in("a@x.com", "pw").await.unwrap();

        let err = store.redeem_reward(&reward_costing(100)).await.unwrap_err();
        assert!(matches!(err, SessionError::Ledger(_)));
        assert_eq!(store.current_user().await.unwrap().points, 2500);
    }

    #[tokio::test]
    async fn redemption_reaches_the_ledger_once() {
        let (store, ledger) = store_with_ledger(false).await;
        store.sign_in("a@x.com", "pw").await.unwrap();
        store.redeem_reward(&reward_costing(100)).await.unwrap();

        let calls = ledger.calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].reward_id, "r-100");
    }

    #[tokio::test]
    async fn category_filter_preserves_catalog_order() {
        let store = test_store().await;
        let gift_cards = store.rewards_in_category(RewardCategory::GiftCards).await;
        assert!(!gift_cards.is_empty());
        assert!(gift_cards
            .iter()
            .all(|r| r.category == RewardCategory::GiftCards));
        let all = store.rewards().await;
        assert!(gift_cards.len() < all.len());
    }
}
