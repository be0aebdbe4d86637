//! Starter data for a freshly signed-in member.
//!
//! The mock backend has no member history to return, so every new session
//! is seeded with the same baseline: three recent activities, a snapshot of
//! plausible health metrics, and a zero-claim PPO plan.

use chrono::{Duration, Utc};

use crate::types::{
    Activity, ActivityKind, BloodPressure, CoverageDetails, HealthMetrics, InsurancePlan,
};

/// Three seeded activities, most recent first.
pub fn starter_activities() -> Vec<Activity> {
    let now = Utc::now();
    vec![
        Activity {
            id: uuid::Uuid::new_v4().to_string(),
            kind: ActivityKind::Steps,
            points: 100,
            timestamp: now,
            description: "Completed Daily Steps Goal".to_string(),
        },
        Activity {
            id: uuid::Uuid::new_v4().to_string(),
            kind: ActivityKind::Workout,
            points: 200,
            timestamp: now - Duration::days(1),
            description: "Completed 30-minute Workout".to_string(),
        },
        Activity {
            id: uuid::Uuid::new_v4().to_string(),
            kind: ActivityKind::Sleep,
            points: 150,
            timestamp: now - Duration::days(2),
            description: "Achieved 8 Hours of Sleep".to_string(),
        },
    ]
}

/// Baseline health metrics for a new session.
pub fn baseline_metrics() -> HealthMetrics {
    HealthMetrics {
        steps: 8234,
        heart_rate: 72,
        sleep_hours: 7.5,
        weight: Some(75.5),
        blood_pressure: Some(BloodPressure {
            systolic: 120,
            diastolic: 80,
            timestamp: Utc::now(),
        }),
    }
}

/// The default plan every mock member is enrolled in. No claims yet.
pub fn default_plan() -> InsurancePlan {
    InsurancePlan {
        plan_name: "Premium Health Plus".to_string(),
        plan_type: "PPO".to_string(),
        coverage_details: CoverageDetails {
            deductible: 1000.0,
            copay: 25.0,
            coinsurance: 0.2,
            out_of_pocket_max: 5000.0,
        },
        claims: Vec::new(),
    }
}
