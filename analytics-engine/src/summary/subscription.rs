use serde::Serialize;

use shared::models::SubscriptionPlan;

use crate::breakdown::{PlanCount, ProductRevenue, plan_breakdown, revenue_by_product};
use crate::period::Snapshot;
use crate::ratio::{churn_rate, conversion_rate};

use super::Kpi;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionSummary {
    pub kpis: Vec<Kpi>,
    pub plans: Vec<PlanCount>,
    pub revenue: Vec<ProductRevenue>,
}

fn plan_count(plans: &[PlanCount], plan: SubscriptionPlan) -> usize {
    plans.iter().find(|p| p.plan == plan).map_or(0, |p| p.count)
}

pub fn subscription_summary(current: &Snapshot, previous: Option<&Snapshot>) -> SubscriptionSummary {
    let plans = plan_breakdown(&current.users);
    let previous_plans = previous.map(|p| plan_breakdown(&p.users));

    let conversion = conversion_rate(&current.users);
    let churn = churn_rate(&current.users);

    let plan_kpi = |title: &'static str, plan: SubscriptionPlan, description: &str| {
        let count = plan_count(&plans, plan);
        let prev = previous_plans
            .as_deref()
            .map(|p| plan_count(p, plan) as f64);
        Kpi::new(title, count.to_string(), description).with_trend(count as f64, prev)
    };

    let kpis = vec![
        Kpi::new(
            "Free-to-Paid Conversion",
            format!("{conversion}%"),
            "Trial to paid conversion rate",
        )
        .with_trend(
            conversion as f64,
            previous.map(|p| conversion_rate(&p.users) as f64),
        ),
        plan_kpi(
            "Monthly Subscribers",
            SubscriptionPlan::Monthly,
            "Active monthly plans",
        ),
        plan_kpi(
            "Yearly Subscribers",
            SubscriptionPlan::Yearly,
            "Active yearly plans",
        ),
        plan_kpi(
            "Dietitian Plans",
            SubscriptionPlan::Dietitian,
            "One-to-one dietitian plans",
        ),
        Kpi::new("Churn Rate", format!("{churn:.1}%"), "Share of inactive users")
            .with_trend(churn, previous.map(|p| churn_rate(&p.users))),
    ];

    SubscriptionSummary {
        kpis,
        plans,
        revenue: revenue_by_product(&current.sales),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::User;

    fn users(total: i64, onboarded: i64) -> Vec<User> {
        let joined = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (1..=total)
            .map(|id| User {
                id,
                name: format!("User {id}"),
                email: format!("user{id}@example.com"),
                onboarding_completed: id <= onboarded,
                plan: if id % 2 == 0 {
                    SubscriptionPlan::Monthly
                } else {
                    SubscriptionPlan::Yearly
                },
                join_date: joined,
                last_active: Some(joined),
            })
            .collect()
    }

    #[test]
    fn test_conversion_with_relative_trend() {
        let current = Snapshot {
            users: users(20, 10),
            ..Default::default()
        };
        let previous = Snapshot {
            users: users(20, 8),
            ..Default::default()
        };

        let summary = subscription_summary(&current, Some(&previous));
        let conversion = &summary.kpis[0];
        assert_eq!(conversion.value, "50%");
        assert_eq!(conversion.trend.as_ref().unwrap().label, "▲ 25.0%");

        assert_eq!(summary.kpis[1].value, "10");
        assert_eq!(summary.kpis[3].value, "0");
        assert_eq!(summary.kpis[4].value, "0.0%");
        assert_eq!(summary.plans.len(), 4);
    }

    #[test]
    fn test_empty_snapshot() {
        let summary = subscription_summary(&Snapshot::default(), None);
        assert_eq!(summary.kpis[0].value, "0%");
        assert!(summary.revenue.is_empty());
        assert!(summary.plans.iter().all(|p| p.count == 0));
    }
}
