use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cohort::{CohortMatrix, retention_matrix};
use crate::period::Snapshot;
use crate::ratio::{average_cohort_size, churn_rate, retention_rate};

use super::Kpi;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortSummary {
    pub kpis: Vec<Kpi>,
    pub matrix: CohortMatrix,
}

/// Retention KPIs and the `window`-month matrix ending at `as_of`.
pub fn cohort_summary(
    current: &Snapshot,
    previous: Option<&Snapshot>,
    as_of: &DateTime<Utc>,
    window: usize,
) -> CohortSummary {
    let users = &current.users;
    let retention = retention_rate(users);
    let churn = churn_rate(users);
    let size = average_cohort_size(users, window);

    CohortSummary {
        kpis: vec![
            Kpi::new("User Retention", format!("{retention:.1}%"), "Overall retention rate")
                .with_trend(retention, previous.map(|p| retention_rate(&p.users))),
            Kpi::new("Churn Rate", format!("{churn:.1}%"), "Monthly churn rate")
                .with_trend(churn, previous.map(|p| churn_rate(&p.users))),
            Kpi::new("Cohort Size", size.to_string(), "Average monthly cohort").with_trend(
                size as f64,
                previous.map(|p| average_cohort_size(&p.users, window) as f64),
            ),
        ],
        matrix: retention_matrix(users, as_of, window),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::models::{SubscriptionPlan, User};

    #[test]
    fn test_cohort_summary() {
        let as_of = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();
        let users: Vec<User> = (1..=12)
            .map(|id| User {
                id,
                name: format!("User {id}"),
                email: format!("user{id}@example.com"),
                onboarding_completed: true,
                plan: SubscriptionPlan::Monthly,
                join_date: Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
                last_active: (id <= 9).then_some(as_of),
            })
            .collect();
        let current = Snapshot {
            users,
            ..Default::default()
        };

        let summary = cohort_summary(&current, None, &as_of, 6);
        let values: Vec<&str> = summary.kpis.iter().map(|k| k.value.as_str()).collect();
        assert_eq!(values, vec!["75.0%", "25.0%", "2"]);
        assert_eq!(summary.matrix.window(), 6);
        assert_eq!(summary.matrix.cell(5, 5), 75.0);
    }
}
