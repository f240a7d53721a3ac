//! Comparison periods
//!
//! Aggregators never know about time windows. Callers filter a collection to
//! a [`DateRange`], run the aggregator, do the same for the preceding window of
//! equal length, and only combine the two results through the trend
//! calculator.

use std::str::FromStr;

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared::models::{
    ContentInteraction, HealthData, Lesson, LessonCompletion, Metric, Sale, Session, User,
};

use crate::trend::{TrendInfo, calculate_trend};

/// Half-open time window `[from, to)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    /// Returns `None` when `to` precedes `from`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Option<Self> {
        (from <= to).then_some(Self { from, to })
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.from <= *instant && *instant < self.to
    }

    pub fn duration(&self) -> Duration {
        self.to - self.from
    }

    /// The window of equal length ending where this one starts.
    pub fn previous(&self) -> Self {
        Self {
            from: self.from - self.duration(),
            to: self.from,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown time range: {0}")]
pub struct ParseTimeRangeError(String);

/// Preset windows ending now, plus a caller-supplied custom window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "90d")]
    Last90Days,
    #[serde(rename = "1y")]
    LastYear,
    #[serde(rename = "custom")]
    Custom,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Last24Hours => "24h",
            Self::Last7Days => "7d",
            Self::Last30Days => "30d",
            Self::Last90Days => "90d",
            Self::LastYear => "1y",
            Self::Custom => "custom",
        }
    }

    /// Window ending at `now`. `Custom` has no bounds of its own and yields
    /// `None`.
    pub fn resolve(&self, now: DateTime<Utc>) -> Option<DateRange> {
        let from = match self {
            Self::Last24Hours => now - Duration::hours(24),
            Self::Last7Days => now - Duration::days(7),
            Self::Last30Days => now - Duration::days(30),
            Self::Last90Days => now - Duration::days(90),
            Self::LastYear => now.checked_sub_months(Months::new(12))?,
            Self::Custom => return None,
        };
        DateRange::new(from, now)
    }
}

impl FromStr for TimeRange {
    type Err = ParseTimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(Self::Last24Hours),
            "7d" => Ok(Self::Last7Days),
            "30d" => Ok(Self::Last30Days),
            "90d" => Ok(Self::Last90Days),
            "1y" => Ok(Self::LastYear),
            "custom" => Ok(Self::Custom),
            other => Err(ParseTimeRangeError(other.to_string())),
        }
    }
}

/// Entities with a reference instant used for period filtering
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

impl Timestamped for Metric {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl Timestamped for Sale {
    fn timestamp(&self) -> DateTime<Utc> {
        self.date
    }
}

impl Timestamped for User {
    fn timestamp(&self) -> DateTime<Utc> {
        self.join_date
    }
}

impl Timestamped for Session {
    fn timestamp(&self) -> DateTime<Utc> {
        self.date
    }
}

impl Timestamped for HealthData {
    fn timestamp(&self) -> DateTime<Utc> {
        self.date
    }
}

impl Timestamped for LessonCompletion {
    fn timestamp(&self) -> DateTime<Utc> {
        self.completed_at
    }
}

pub fn filter_period<T: Timestamped + Clone>(items: &[T], range: &DateRange) -> Vec<T> {
    items
        .iter()
        .filter(|item| range.contains(&item.timestamp()))
        .cloned()
        .collect()
}

/// The same aggregate over the current and the previous window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison<R> {
    pub current: R,
    pub previous: R,
}

impl<R> Comparison<R> {
    pub fn trend(&self, value: impl Fn(&R) -> f64) -> TrendInfo {
        calculate_trend(value(&self.current), Some(value(&self.previous)))
    }
}

pub fn compare_periods<T, R, F>(items: &[T], range: &DateRange, aggregate: F) -> Comparison<R>
where
    T: Timestamped + Clone,
    F: Fn(&[T]) -> R,
{
    let current = filter_period(items, range);
    let previous = filter_period(items, &range.previous());
    Comparison {
        current: aggregate(&current),
        previous: aggregate(&previous),
    }
}

/// Every collection the page summaries read, fetched together
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub metrics: Vec<Metric>,
    pub sales: Vec<Sale>,
    pub users: Vec<User>,
    pub sessions: Vec<Session>,
    pub health_data: Vec<HealthData>,
    pub lessons: Vec<Lesson>,
    pub completions: Vec<LessonCompletion>,
    pub interactions: Vec<ContentInteraction>,
}

impl Snapshot {
    /// Dated collections restricted to `range`. Lessons and content
    /// interactions carry no instant and pass through unchanged.
    pub fn within(&self, range: &DateRange) -> Self {
        Self {
            metrics: filter_period(&self.metrics, range),
            sales: filter_period(&self.sales, range),
            users: filter_period(&self.users, range),
            sessions: filter_period(&self.sessions, range),
            health_data: filter_period(&self.health_data, range),
            lessons: self.lessons.clone(),
            completions: filter_period(&self.completions, range),
            interactions: self.interactions.clone(),
        }
    }
}
