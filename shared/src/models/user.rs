//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Subscription plan a user is enrolled in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Monthly,
    Yearly,
    Dietitian,
    #[default]
    FreeTrial,
}

impl SubscriptionPlan {
    /// Every plan, in display order
    pub const ALL: [SubscriptionPlan; 4] = [
        SubscriptionPlan::Monthly,
        SubscriptionPlan::Yearly,
        SubscriptionPlan::Dietitian,
        SubscriptionPlan::FreeTrial,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly Plan",
            Self::Yearly => "Yearly Plan",
            Self::Dietitian => "Dietitian Plan",
            Self::FreeTrial => "Free Trial",
        }
    }
}

/// Program participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub onboarding_completed: bool,
    #[serde(default)]
    pub plan: SubscriptionPlan,
    pub join_date: DateTime<Utc>,
    /// Present once the user has been active; absent users count as inactive
    pub last_active: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.last_active.is_some()
    }
}

/// Create user payload
///
/// `join_date` defaults to the insert time when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub plan: SubscriptionPlan,
    pub join_date: Option<DateTime<Utc>>,
    pub last_active: Option<DateTime<Utc>>,
}
