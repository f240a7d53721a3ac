//! Sale Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A single program sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub product: String,
    /// Whole currency units
    pub amount: u64,
    pub date: DateTime<Utc>,
}

/// Create sale payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    #[validate(length(min = 1, max = 200))]
    pub product: String,
    pub amount: u64,
    pub date: DateTime<Utc>,
}
