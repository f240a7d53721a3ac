use serde::Serialize;

use shared::models::HealthData;

use crate::period::Snapshot;
use crate::ratio::health_update_rate;
use crate::trend::round_one_decimal;

use super::{Kpi, SeriesPoint};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    pub kpis: Vec<Kpi>,
    /// kg
    pub weight: Vec<SeriesPoint>,
    /// cm
    pub waist: Vec<SeriesPoint>,
    /// mg/dL
    pub blood_glucose: Vec<SeriesPoint>,
}

/// Date-ordered series of the records that carry the measurement.
fn series(records: &[&HealthData], value: impl Fn(&HealthData) -> Option<f64>) -> Vec<SeriesPoint> {
    records
        .iter()
        .filter_map(|&d| value(d).map(|y| SeriesPoint { x: d.date, y }))
        .collect()
}

/// First reading minus last reading, one decimal; `None` below two readings.
fn change(series: &[SeriesPoint]) -> Option<f64> {
    match series {
        [first, .., last] => Some(round_one_decimal(first.y - last.y)),
        _ => None,
    }
}

fn format_change(change: Option<f64>, unit: &str) -> String {
    change.map_or_else(|| "N/A".to_string(), |c| format!("{c}{unit}"))
}

pub fn health_summary(current: &Snapshot, previous: Option<&Snapshot>) -> HealthSummary {
    let mut records: Vec<&HealthData> = current.health_data.iter().collect();
    records.sort_by_key(|d| d.date);

    let weight = series(&records, HealthData::weight_kg);
    let waist = series(&records, HealthData::waist_cm);
    let blood_glucose = series(&records, |d| d.blood_glucose.map(f64::from));

    let updates = health_update_rate(&current.health_data, &current.users);

    HealthSummary {
        kpis: vec![
            Kpi::new(
                "Health Updates",
                format!("{updates}%"),
                "Users tracking health metrics",
            )
            .with_trend(
                updates as f64,
                previous.map(|p| health_update_rate(&p.health_data, &p.users) as f64),
            ),
            Kpi::new(
                "Avg Weight Change",
                format_change(change(&weight), "kg"),
                "Average weight loss",
            ),
            Kpi::new(
                "Waist Reduction",
                format_change(change(&waist), "cm"),
                "Average reduction",
            ),
        ],
        weight,
        waist,
        blood_glucose,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: i64, day: u32, weight: Option<u32>, waist: Option<u32>) -> HealthData {
        HealthData {
            id,
            user_id: id,
            weight,
            waist_circumference: waist,
            blood_glucose: Some(95),
            date: Utc.with_ymd_and_hms(2024, 4, day, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_series_sorted_and_converted() {
        let current = Snapshot {
            health_data: vec![
                record(1, 20, Some(80_000), None),
                record(2, 1, Some(84_250), Some(1000)),
                record(3, 10, None, Some(955)),
            ],
            ..Default::default()
        };
        let summary = health_summary(&current, None);

        assert_eq!(summary.weight.len(), 2);
        assert_eq!(summary.weight[0].y, 84.25);
        assert_eq!(summary.waist[1].y, 95.5);
        assert_eq!(summary.blood_glucose.len(), 3);

        assert_eq!(summary.kpis[1].value, "4.3kg");
        assert_eq!(summary.kpis[2].value, "4.5cm");
    }

    #[test]
    fn test_single_reading_is_not_available() {
        let current = Snapshot {
            health_data: vec![record(1, 1, Some(80_000), None)],
            ..Default::default()
        };
        let summary = health_summary(&current, None);
        assert_eq!(summary.kpis[0].value, "0%");
        assert_eq!(summary.kpis[1].value, "N/A");
        assert_eq!(summary.kpis[2].value, "N/A");
    }
}
