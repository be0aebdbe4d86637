//! Core data model for the healthcare-rewards program.
//!
//! These records mirror the wire shapes the mobile front-end consumes:
//! camelCase field names and string enum values like "giftCards". Everything
//! here is plain data; mutation rules live in [`crate::store`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A signed-in member.
///
/// Exists only while a session is active: created at sign-in, discarded at
/// sign-out. The store never fabricates a user to stand in for "nobody".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Reward point balance. No store operation ever drives this below zero.
    pub points: u64,
    pub insurance_plan: InsurancePlan,
    pub health_metrics: HealthMetrics,
    /// Most recent first, append-only.
    pub recent_activities: Vec<Activity>,
}

/// The member's insurance plan. Owned by exactly one [`User`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePlan {
    pub plan_name: String,
    pub plan_type: String,
    pub coverage_details: CoverageDetails,
    pub claims: Vec<Claim>,
}

/// Plan cost-sharing terms. All amounts are non-negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageDetails {
    pub deductible: f64,
    pub copay: f64,
    /// Fraction of costs the member pays after the deductible (0.0..=1.0).
    pub coinsurance: f64,
    pub out_of_pocket_max: f64,
}

/// An insurance claim. Immutable once created — there is no status
/// transition logic in this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: String,
    pub date: DateTime<Utc>,
    pub amount: f64,
    pub status: ClaimStatus,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Denied,
    Processed,
}

/// A snapshot of the member's health metrics.
///
/// Updates replace the whole snapshot; there are no merge semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetrics {
    pub steps: u32,
    pub heart_rate: u32,
    pub sleep_hours: f64,
    pub weight: Option<f64>,
    pub blood_pressure: Option<BloodPressure>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressure {
    pub systolic: u32,
    pub diastolic: u32,
    pub timestamp: DateTime<Utc>,
}

/// A point-earning activity in the member's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub points: u64,
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

impl Activity {
    /// Create a new activity stamped with the current time.
    pub fn new(kind: ActivityKind, points: u64, description: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            points,
            timestamp: Utc::now(),
            description: description.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    Steps,
    Workout,
    Sleep,
    Checkup,
    Vaccination,
    Medication,
}

/// A redeemable reward from the static catalog. Not owned by any user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Always positive.
    pub points_cost: u64,
    pub category: RewardCategory,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RewardCategory {
    GiftCards,
    Health,
    Fitness,
    Wellness,
    Merchandise,
}

/// A member-defined health goal with a deadline and a point payout.
///
/// Created by the member, mutated by progress updates, never auto-deleted.
/// Completion/payout logic is out of scope for the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthGoal {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: GoalKind,
    pub target: f64,
    pub current: f64,
    pub deadline: DateTime<Utc>,
    pub points_reward: u64,
}

impl HealthGoal {
    /// Create a new goal with zero progress.
    pub fn new(kind: GoalKind, target: f64, deadline: DateTime<Utc>, points_reward: u64) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            target,
            current: 0.0,
            deadline,
            points_reward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalKind {
    Steps,
    Sleep,
    Weight,
    Exercise,
    Checkup,
}
