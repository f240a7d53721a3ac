//! Health Data Model
//!
//! Measurements are stored in fixed integer units (grams, millimetres,
//! mg/dL); conversion to kg/cm happens only when building display series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One health check-in; any measurement may be missing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthData {
    pub id: i64,
    pub user_id: i64,
    /// Grams
    pub weight: Option<u32>,
    /// Millimetres
    pub waist_circumference: Option<u32>,
    /// mg/dL
    pub blood_glucose: Option<u32>,
    pub date: DateTime<Utc>,
}

impl HealthData {
    pub fn weight_kg(&self) -> Option<f64> {
        self.weight.map(|g| g as f64 / 1000.0)
    }

    pub fn waist_cm(&self) -> Option<f64> {
        self.waist_circumference.map(|mm| mm as f64 / 10.0)
    }
}

/// Create health data payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewHealthData {
    #[validate(range(min = 1))]
    pub user_id: i64,
    pub weight: Option<u32>,
    pub waist_circumference: Option<u32>,
    pub blood_glucose: Option<u32>,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_conversion() {
        let data = HealthData {
            id: 1,
            user_id: 1,
            weight: Some(82_500),
            waist_circumference: Some(915),
            blood_glucose: None,
            date: Utc::now(),
        };
        assert_eq!(data.weight_kg(), Some(82.5));
        assert_eq!(data.waist_cm(), Some(91.5));
    }
}
