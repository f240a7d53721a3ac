//! Derived-metrics engine for the wellness dashboard
//!
//! Pure functions that turn immutable entity snapshots into display-ready
//! aggregates. Nothing here performs I/O or holds state between calls, and
//! every aggregator is total: empty collections, zero denominators and missing
//! optional fields produce 0 (or `None`) rather than an error.
//!
//! # Modules
//!
//! - [`trend`]: relative change between a current and a previous value
//! - [`ratio`]: percentage helpers and the per-page rate aggregators
//! - [`cohort`]: monthly cohort retention matrix
//! - [`funnel`]: ordered stage funnels
//! - [`breakdown`]: tallies over closed enumerations and products
//! - [`period`]: date ranges, previous-period windows and snapshot filtering
//! - [`summary`]: per-page view models assembled from the above

pub mod breakdown;
pub mod cohort;
pub mod funnel;
pub mod period;
pub mod ratio;
pub mod summary;
pub mod trend;

pub use cohort::{CohortMatrix, DEFAULT_COHORT_WINDOW, YearMonth, retention_matrix};
pub use funnel::{Funnel, FunnelStage, onboarding_funnel};
pub use period::{Comparison, DateRange, Snapshot, TimeRange, Timestamped, compare_periods};
pub use ratio::{distinct_count, percentage, share};
pub use summary::Kpi;
pub use trend::{TrendDirection, TrendInfo, calculate_trend, format_grouped, format_trend_value};
