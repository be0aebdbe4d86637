//! CarePoints — session and rewards state engine for a healthcare-rewards
//! program.
//!
//! The crate owns the signed-in member, the reward catalog, and the
//! member's health goals, and exposes the mutation operations a front-end
//! consumes: sign-in/out, point accrual, reward redemption, metrics and
//! goal tracking. Identity and redemption persistence live behind the
//! [`AuthProvider`] and [`RewardsLedger`] seams, so the bundled in-memory
//! mocks can be swapped for a real backend without touching the store
//! contract.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use carepoints::{InMemoryLedger, MockAuthProvider, SessionStore, StoreConfig};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let store = SessionStore::new(
//!     StoreConfig::default(),
//!     Arc::new(MockAuthProvider::new()),
//!     Arc::new(InMemoryLedger::new()),
//! )
//! .await?;
//!
//! let user = store.sign_in("a@x.com", "secret").await?;
//! println!("{} has {} points", user.name, user.points);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod providers;
pub mod seed;
pub mod store;
pub mod traits;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::StoreConfig;
pub use error::SessionError;
pub use events::{store_event_bus, StoreEvent, StoreEventReceiver, StoreEventSender};
pub use providers::{InMemoryLedger, MockAuthProvider};
pub use store::SessionStore;
pub use traits::{AuthProvider, RewardsLedger, UserIdentity};
