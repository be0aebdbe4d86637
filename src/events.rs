//! Store event bus.
//!
//! Every successful mutation publishes exactly one [`StoreEvent`] on a
//! broadcast channel. UI consumers subscribe and re-render on receipt
//! instead of polling the store; failed and no-op operations publish
//! nothing.

use tokio::sync::broadcast;

/// What changed in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    SignedIn { user_id: String },
    SignedOut,
    MetricsUpdated,
    /// Balance changed (points added, activity credited, or reward
    /// redeemed). Carries the new balance so simple badges can render
    /// without a snapshot read.
    PointsChanged { balance: u64 },
    GoalsChanged,
}

pub type StoreEventSender = broadcast::Sender<StoreEvent>;
pub type StoreEventReceiver = broadcast::Receiver<StoreEvent>;

/// Create a new store event bus (broadcast channel).
pub fn store_event_bus(capacity: usize) -> (StoreEventSender, StoreEventReceiver) {
    broadcast::channel(capacity)
}
