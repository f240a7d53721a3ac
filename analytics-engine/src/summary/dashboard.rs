use serde::Serialize;

use shared::models::{Metric, Sale};

use crate::breakdown::total_revenue;
use crate::period::Snapshot;
use crate::trend::format_grouped;

use super::{Kpi, SeriesPoint};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub stats: Vec<Kpi>,
    /// Sale amounts over time, oldest first
    pub revenue: Vec<SeriesPoint>,
    /// Sum of the sales in the window
    pub total_revenue: u64,
    /// Recent sales, newest first
    pub sales: Vec<Sale>,
}

/// Value of the first metric named `name`, 0 when there is none.
pub fn metric_value(metrics: &[Metric], name: &str) -> f64 {
    metrics
        .iter()
        .find(|m| m.name == name)
        .map_or(0.0, |m| m.value)
}

pub fn dashboard_summary(current: &Snapshot, previous: Option<&Snapshot>) -> DashboardSummary {
    let lookup = |name: &str| {
        (
            metric_value(&current.metrics, name),
            previous.map(|p| metric_value(&p.metrics, name)),
        )
    };

    let (users, users_prev) = lookup("Total Users");
    let (active, active_prev) = lookup("Active Users");
    let (revenue, revenue_prev) = lookup("Revenue");
    let (growth, growth_prev) = lookup("Growth");

    let mut sales = current.sales.clone();
    sales.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    let revenue_series = sales
        .iter()
        .rev()
        .map(|s| SeriesPoint {
            x: s.date,
            y: s.amount as f64,
        })
        .collect();

    DashboardSummary {
        stats: vec![
            Kpi::new("Total Users", format_grouped(users), "Registered users")
                .with_trend(users, users_prev),
            Kpi::new("Active Users", format_grouped(active), "Users active in the program")
                .with_trend(active, active_prev),
            Kpi::new("Revenue", format!("${}", format_grouped(revenue)), "Total revenue")
                .with_trend(revenue, revenue_prev),
            Kpi::new("Growth", format!("{}%", format_grouped(growth)), "User growth")
                .with_trend(growth, growth_prev),
        ],
        revenue: revenue_series,
        total_revenue: total_revenue(&current.sales),
        sales,
    }
}
