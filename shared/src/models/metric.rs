//! Metric Model (named KPI values)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Named KPI value, unique by `name` within a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub id: i64,
    /// Lookup key, e.g. "Total Users"
    pub name: String,
    pub value: f64,
    /// Grouping label: users | finance | funnel | engagement
    pub category: String,
    /// Stamped by the store at insert time
    pub timestamp: DateTime<Utc>,
}

/// Create metric payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMetric {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub value: f64,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
}
