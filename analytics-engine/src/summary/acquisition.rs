use serde::Serialize;

use crate::funnel::{Funnel, onboarding_funnel};
use crate::period::Snapshot;
use crate::trend::format_grouped;

use super::{Kpi, metric_value};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcquisitionSummary {
    pub kpis: Vec<Kpi>,
    pub funnel: Funnel,
}

/// Sign-up KPIs read from the named metrics, plus the onboarding funnel
/// measured on the raw users and completions.
pub fn acquisition_summary(current: &Snapshot, previous: Option<&Snapshot>) -> AcquisitionSummary {
    let metric = |name: &str| {
        (
            metric_value(&current.metrics, name),
            previous.map(|p| metric_value(&p.metrics, name)),
        )
    };
    let percent_kpi = |title: &'static str, name: &str, description: &str| {
        let (value, prev) = metric(name);
        Kpi::new(title, format!("{}%", format_grouped(value)), description).with_trend(value, prev)
    };

    let (sign_ups, sign_ups_prev) = metric("Total Users");

    AcquisitionSummary {
        kpis: vec![
            Kpi::new(
                "Total Sign-ups",
                format_grouped(sign_ups),
                "All time registered users",
            )
            .with_trend(sign_ups, sign_ups_prev),
            percent_kpi("Intro Calls Booked", "Intro Call Rate", "Of total sign-ups"),
            percent_kpi(
                "Profile Completion",
                "Profile Completion",
                "Users with complete profiles",
            ),
            percent_kpi(
                "First Lesson Started",
                "First Lesson",
                "Users who started learning",
            ),
        ],
        funnel: onboarding_funnel(&current.users, &current.completions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::models::Metric;

    #[test]
    fn test_acquisition_kpis() {
        let metric = |id, name: &str, value| Metric {
            id,
            name: name.to_string(),
            value,
            category: "funnel".to_string(),
            timestamp: Utc::now(),
        };
        let current = Snapshot {
            metrics: vec![
                metric(1, "Total Users", 1250.0),
                metric(2, "Intro Call Rate", 42.0),
                metric(3, "First Lesson", 65.0),
            ],
            ..Default::default()
        };

        let summary = acquisition_summary(&current, None);
        let values: Vec<&str> = summary.kpis.iter().map(|k| k.value.as_str()).collect();
        assert_eq!(values, vec!["1,250", "42%", "0%", "65%"]);
        assert_eq!(summary.funnel.stages.len(), 4);
        assert_eq!(summary.funnel.stages[0].count, 0);
    }
}
