//! Cohort retention matrix
//!
//! Users are grouped by the calendar month (UTC) they joined. For a window of
//! N trailing months the matrix is dense N×N: row *i* is the cohort that
//! joined in month *i*, column *j* the share of that cohort whose last
//! activity fell in month *j*. Months run oldest first.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use serde::{Serialize, Serializer};

use shared::models::User;

/// Months covered when the caller does not choose a window
pub const DEFAULT_COHORT_WINDOW: usize = 6;

/// A calendar month, displayed as `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    /// 1..=12
    month: u32,
}

impl YearMonth {
    /// Returns `None` unless `month` is in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(instant: &DateTime<Utc>) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
        }
    }

    pub fn pred(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// The `count` months ending with the month of `as_of`, oldest first.
    pub fn trailing(as_of: &DateTime<Utc>, count: usize) -> Vec<Self> {
        let mut months = Vec::with_capacity(count);
        let mut current = Self::of(as_of);
        for _ in 0..count {
            months.push(current);
            current = current.pred();
        }
        months.reverse();
        months
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One cohort row of the matrix
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortRow {
    pub cohort: YearMonth,
    pub size: usize,
    /// Percent of the cohort last active in each month of the window, one decimal
    pub retention: Vec<f64>,
}

/// Dense retention matrix, rows and columns in the same month order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortMatrix {
    pub months: Vec<YearMonth>,
    pub rows: Vec<CohortRow>,
}

impl CohortMatrix {
    pub fn window(&self) -> usize {
        self.months.len()
    }

    /// Retention of cohort `row` in month `column`; 0 outside the matrix.
    pub fn cell(&self, row: usize, column: usize) -> f64 {
        self.rows
            .get(row)
            .and_then(|r| r.retention.get(column))
            .copied()
            .unwrap_or(0.0)
    }
}

/// Build the `window`×`window` retention matrix for the months ending at
/// `as_of`.
pub fn retention_matrix(users: &[User], as_of: &DateTime<Utc>, window: usize) -> CohortMatrix {
    let months = YearMonth::trailing(as_of, window);

    let rows = months
        .iter()
        .map(|&cohort_month| {
            let cohort: Vec<&User> = users
                .iter()
                .filter(|u| YearMonth::of(&u.join_date) == cohort_month)
                .collect();

            let retention = months
                .iter()
                .map(|&active_month| {
                    let active = cohort
                        .iter()
                        .filter(|u| {
                            u.last_active
                                .is_some_and(|at| YearMonth::of(&at) == active_month)
                        })
                        .count();
                    crate::ratio::percentage_one_decimal(active, cohort.len())
                })
                .collect();

            CohortRow {
                cohort: cohort_month,
                size: cohort.len(),
                retention,
            }
        })
        .collect();

    CohortMatrix { months, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::models::SubscriptionPlan;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn user(id: i64, joined: DateTime<Utc>, last_active: Option<DateTime<Utc>>) -> User {
        User {
            id,
            name: format!("User {id}"),
            email: format!("user{id}@example.com"),
            onboarding_completed: false,
            plan: SubscriptionPlan::Monthly,
            join_date: joined,
            last_active,
        }
    }

    #[test]
    fn test_trailing_months_wrap_year_oldest_first() {
        let months = YearMonth::trailing(&at(2024, 2, 29), 6);
        let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
        assert_eq!(
            labels,
            vec!["2023-09", "2023-10", "2023-11", "2023-12", "2024-01", "2024-02"]
        );
    }

    #[test]
    fn test_end_of_month_does_not_skip_months() {
        // 31 March minus one month must be February, not March again
        let months = YearMonth::trailing(&at(2024, 3, 31), 2);
        assert_eq!(months[0], YearMonth::new(2024, 2).unwrap());
        assert_eq!(months[1], YearMonth::new(2024, 3).unwrap());
    }

    #[test]
    fn test_year_month_new_validates_month() {
        assert!(YearMonth::new(2024, 0).is_none());
        assert!(YearMonth::new(2024, 13).is_none());
        assert_eq!(YearMonth::new(2024, 7).unwrap().to_string(), "2024-07");
    }

    #[test]
    fn test_empty_users_yield_dense_zero_matrix() {
        let matrix = retention_matrix(&[], &at(2024, 6, 15), DEFAULT_COHORT_WINDOW);
        assert_eq!(matrix.window(), 6);
        assert_eq!(matrix.rows.len(), 6);
        for row in &matrix.rows {
            assert_eq!(row.size, 0);
            assert_eq!(row.retention.len(), 6);
            assert!(row.retention.iter().all(|&cell| cell == 0.0));
        }
    }

    #[test]
    fn test_retention_cells() {
        let users = vec![
            user(1, at(2024, 4, 2), Some(at(2024, 4, 20))),
            user(2, at(2024, 4, 10), Some(at(2024, 6, 1))),
            user(3, at(2024, 4, 28), None),
            user(4, at(2024, 4, 30), Some(at(2024, 6, 14))),
            user(5, at(2024, 6, 3), Some(at(2024, 6, 3))),
            // outside the window
            user(6, at(2023, 12, 1), Some(at(2024, 6, 3))),
        ];

        let matrix = retention_matrix(&users, &at(2024, 6, 15), 3);
        assert_eq!(matrix.months[0].to_string(), "2024-04");

        let april = &matrix.rows[0];
        assert_eq!(april.size, 4);
        assert_eq!(april.retention, vec![25.0, 0.0, 50.0]);

        let may = &matrix.rows[1];
        assert_eq!(may.size, 0);
        assert_eq!(may.retention, vec![0.0, 0.0, 0.0]);

        assert_eq!(matrix.cell(2, 2), 100.0);
        assert_eq!(matrix.cell(9, 9), 0.0);
    }

    #[test]
    fn test_serializes_month_labels() {
        let matrix = retention_matrix(&[], &at(2024, 1, 1), 1);
        let json = serde_json::to_value(&matrix).unwrap();
        assert_eq!(json["months"][0], "2024-01");
        assert_eq!(json["rows"][0]["cohort"], "2024-01");
        assert_eq!(json["rows"][0]["size"], 0);
    }
}
