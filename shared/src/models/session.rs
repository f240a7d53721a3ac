//! Group Session Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Live group session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: i64,
    pub name: String,
    pub attendee_count: u32,
    pub date: DateTime<Utc>,
    /// Minutes
    pub duration: u32,
}

/// Create session payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSession {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub attendee_count: u32,
    pub date: DateTime<Utc>,
    #[validate(range(min = 1, max = 1440))]
    pub duration: u32,
}
