//! Page summaries
//!
//! One view model per dashboard page, assembled from the aggregators in the
//! sibling modules. Builders take the snapshot of the selected window and,
//! when a comparison was requested, the snapshot of the preceding window;
//! only then do KPIs carry a trend.

mod acquisition;
mod cohort;
mod dashboard;
mod engagement;
mod health;
mod sessions;
mod subscription;

pub use acquisition::{AcquisitionSummary, acquisition_summary};
pub use cohort::{CohortSummary, cohort_summary};
pub use dashboard::{DashboardSummary, dashboard_summary, metric_value};
pub use engagement::{EngagementSummary, LessonRow, engagement_summary};
pub use health::{HealthSummary, health_summary};
pub use sessions::{SessionsSummary, sessions_summary};
pub use subscription::{SubscriptionSummary, subscription_summary};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::trend::{TrendInfo, calculate_trend};

/// A headline figure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    pub title: &'static str,
    pub value: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendInfo>,
}

impl Kpi {
    pub fn new(title: &'static str, value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title,
            value: value.into(),
            description: description.into(),
            trend: None,
        }
    }

    /// Attach the trend of `current` against `previous`, if there is a
    /// previous value at all.
    pub fn with_trend(mut self, current: f64, previous: Option<f64>) -> Self {
        self.trend = previous.map(|p| calculate_trend(current, Some(p)));
        self
    }
}

/// One point of a time series chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: DateTime<Utc>,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trend::TrendDirection;

    #[test]
    fn test_kpi_without_previous_has_no_trend() {
        let kpi = Kpi::new("Total Users", "20", "Registered users").with_trend(20.0, None);
        assert!(kpi.trend.is_none());

        let json = serde_json::to_value(&kpi).unwrap();
        assert!(json.get("trend").is_none());
        assert_eq!(json["title"], "Total Users");
    }

    #[test]
    fn test_kpi_with_previous() {
        let kpi = Kpi::new("Conversion", "50%", "").with_trend(50.0, Some(40.0));
        let trend = kpi.trend.unwrap();
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.label, "▲ 25.0%");
    }
}
