//! Analytics API
//!
//! Server-side rendering of the dashboard pages. Every handler fetches the
//! collections concurrently, narrows them to the requested window and hands
//! the snapshots to the engine.
//!
//! Query parameters shared by all pages:
//!
//! | Parameter | Meaning |
//! |-----------|---------|
//! | `range` | `24h`, `7d`, `30d`, `90d`, `1y` or `custom`; absent = all data |
//! | `from`, `to` | window bounds, required with `custom` (a bare pair implies `custom`) |
//! | `compare` | `true` adds trends against the preceding window of equal length |
//! | `window` | cohort page only, months in the retention matrix |

use analytics_engine::period::Snapshot;
use analytics_engine::summary::{
    AcquisitionSummary, CohortSummary, DashboardSummary, EngagementSummary, HealthSummary,
    SessionsSummary, SubscriptionSummary, acquisition_summary, cohort_summary, dashboard_summary,
    engagement_summary, health_summary, sessions_summary, subscription_summary,
};
use analytics_engine::{DateRange, TimeRange};
use axum::routing::get;
use axum::{
    Json, Router,
    extract::{Query, State},
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use shared::util::parse_instant;
use shared::{AppError, AppResult, ErrorCode};

use crate::state::AppState;
use crate::storage::Storage;

/// Largest accepted cohort window, in months
pub const MAX_COHORT_WINDOW: usize = 24;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/analytics", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/acquisition", get(get_acquisition))
        .route("/subscription", get(get_subscription))
        .route("/cohort", get(get_cohort))
        .route("/sessions", get(get_sessions))
        .route("/health", get(get_health))
        .route("/engagement", get(get_engagement))
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub range: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub compare: bool,
    pub window: Option<usize>,
}

/// Page summary plus the window it was computed over
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse<T> {
    /// Absent when the page covers all data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<DateRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_range: Option<DateRange>,
    #[serde(flatten)]
    pub summary: T,
}

fn parse_bound(name: &'static str, value: &str) -> AppResult<DateTime<Utc>> {
    parse_instant(value).ok_or_else(|| {
        AppError::with_message(ErrorCode::InvalidFormat, format!("Invalid '{name}' instant"))
            .with_detail(name, value)
    })
}

/// Resolve the requested window; `Ok(None)` means all data.
pub fn resolve_range(query: &AnalyticsQuery, now: DateTime<Utc>) -> AppResult<Option<DateRange>> {
    let time_range = match (&query.range, &query.from, &query.to) {
        (Some(range), _, _) => range.parse::<TimeRange>().map_err(|e| {
            AppError::with_message(ErrorCode::InvalidTimeRange, e.to_string())
                .with_detail("range", range.as_str())
        })?,
        (None, None, None) => {
            if query.compare {
                return Err(AppError::invalid_request(
                    "'compare' requires a 'range' or 'from'/'to' bounds",
                ));
            }
            return Ok(None);
        }
        (None, _, _) => TimeRange::Custom,
    };

    if let Some(range) = time_range.resolve(now) {
        if query.from.is_some() || query.to.is_some() {
            return Err(AppError::invalid_request(
                "'from'/'to' are only accepted with range=custom",
            )
            .with_detail("range", time_range.as_str()));
        }
        return Ok(Some(range));
    }

    let (Some(from), Some(to)) = (&query.from, &query.to) else {
        return Err(AppError::new(ErrorCode::MissingRangeBounds));
    };
    let from = parse_bound("from", from)?;
    let to = parse_bound("to", to)?;

    DateRange::new(from, to).map(Some).ok_or_else(|| {
        AppError::new(ErrorCode::InvalidDateRange)
            .with_detail("from", from.to_rfc3339())
            .with_detail("to", to.to_rfc3339())
    })
}

// ============================================================================
// Snapshot Loading
// ============================================================================

async fn load_snapshot(storage: &dyn Storage) -> AppResult<Snapshot> {
    let (metrics, sales, users, sessions, health_data, lessons, completions, interactions) =
        tokio::try_join!(
            storage.get_metrics(),
            storage.get_sales(),
            storage.get_users(),
            storage.get_sessions(),
            storage.get_health_data(),
            storage.get_lessons(),
            storage.get_lesson_completions(),
            storage.get_content_interactions(),
        )?;

    Ok(Snapshot {
        metrics,
        sales,
        users,
        sessions,
        health_data,
        lessons,
        completions,
        interactions,
    })
}

/// Snapshots a page is built from
struct Windows {
    current: Snapshot,
    previous: Option<Snapshot>,
    range: Option<DateRange>,
    previous_range: Option<DateRange>,
    /// Reference instant for month-based views: the last instant inside the
    /// window, or now
    as_of: DateTime<Utc>,
}

impl Windows {
    fn respond<T>(self, summary: T) -> Json<AnalyticsResponse<T>> {
        Json(AnalyticsResponse {
            range: self.range,
            previous_range: self.previous_range,
            summary,
        })
    }
}

async fn load_windows(state: &AppState, query: &AnalyticsQuery) -> AppResult<Windows> {
    let now = Utc::now();
    let range = resolve_range(query, now)?;
    let snapshot = load_snapshot(state.storage.as_ref()).await?;

    let Some(range) = range else {
        return Ok(Windows {
            current: snapshot,
            previous: None,
            range: None,
            previous_range: None,
            as_of: now,
        });
    };

    let previous_range = query.compare.then(|| range.previous());
    tracing::debug!(
        from = %range.from,
        to = %range.to,
        compare = query.compare,
        "Computing analytics window"
    );

    Ok(Windows {
        current: snapshot.within(&range),
        previous: previous_range.map(|p| snapshot.within(&p)),
        range: Some(range),
        previous_range,
        as_of: if range.to > range.from {
            range.to - Duration::milliseconds(1)
        } else {
            range.from
        },
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/analytics/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsResponse<DashboardSummary>>> {
    let w = load_windows(&state, &query).await?;
    let summary = dashboard_summary(&w.current, w.previous.as_ref());
    Ok(w.respond(summary))
}

/// GET /api/analytics/acquisition
pub async fn get_acquisition(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsResponse<AcquisitionSummary>>> {
    let w = load_windows(&state, &query).await?;
    let summary = acquisition_summary(&w.current, w.previous.as_ref());
    Ok(w.respond(summary))
}

/// GET /api/analytics/subscription
pub async fn get_subscription(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsResponse<SubscriptionSummary>>> {
    let w = load_windows(&state, &query).await?;
    let summary = subscription_summary(&w.current, w.previous.as_ref());
    Ok(w.respond(summary))
}

/// GET /api/analytics/cohort
pub async fn get_cohort(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsResponse<CohortSummary>>> {
    let window = query.window.unwrap_or(state.config.cohort_window_months);
    if !(1..=MAX_COHORT_WINDOW).contains(&window) {
        return Err(AppError::new(ErrorCode::InvalidCohortWindow)
            .with_detail("window", window)
            .with_detail("max", MAX_COHORT_WINDOW));
    }

    let w = load_windows(&state, &query).await?;
    let summary = cohort_summary(&w.current, w.previous.as_ref(), &w.as_of, window);
    Ok(w.respond(summary))
}

/// GET /api/analytics/sessions
pub async fn get_sessions(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsResponse<SessionsSummary>>> {
    let w = load_windows(&state, &query).await?;
    let summary = sessions_summary(&w.current, w.previous.as_ref());
    Ok(w.respond(summary))
}

/// GET /api/analytics/health
pub async fn get_health(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsResponse<HealthSummary>>> {
    let w = load_windows(&state, &query).await?;
    let summary = health_summary(&w.current, w.previous.as_ref());
    Ok(w.respond(summary))
}

/// GET /api/analytics/engagement
pub async fn get_engagement(
    State(state): State<AppState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsResponse<EngagementSummary>>> {
    let w = load_windows(&state, &query).await?;
    let summary = engagement_summary(&w.current, w.previous.as_ref());
    Ok(w.respond(summary))
}
