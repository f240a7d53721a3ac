//! Percentage and ratio aggregators
//!
//! Every rate is `count / total * 100` rounded to a whole percent, and a zero
//! denominator always yields 0.

use std::collections::HashSet;
use std::hash::Hash;

use shared::models::{HealthData, LessonCompletion, Session, User};

/// `count / total * 100`, rounded to the nearest whole percent.
///
/// The two counts may come from unrelated collections, so the result is not
/// capped at 100.
pub fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}

/// Like [`percentage`] but kept to one decimal place.
pub fn percentage_one_decimal(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Share of `items` matching `predicate`, in `0..=100`.
pub fn share<T>(items: &[T], predicate: impl Fn(&T) -> bool) -> u32 {
    let matching = items.iter().filter(|item| predicate(item)).count();
    percentage(matching, items.len())
}

/// Number of distinct keys among `items`.
pub fn distinct_count<T, K: Eq + Hash>(items: &[T], key: impl Fn(&T) -> K) -> usize {
    items.iter().map(key).collect::<HashSet<_>>().len()
}

// ============================================================================
// Users
// ============================================================================

pub fn active_user_count(users: &[User]) -> usize {
    users.iter().filter(|u| u.is_active()).count()
}

/// Users who completed onboarding, as a share of all users.
pub fn conversion_rate(users: &[User]) -> u32 {
    share(users, |u| u.onboarding_completed)
}

/// Active users as a share of all users, one decimal.
pub fn retention_rate(users: &[User]) -> f64 {
    percentage_one_decimal(active_user_count(users), users.len())
}

/// Inactive users as a share of all users, one decimal.
pub fn churn_rate(users: &[User]) -> f64 {
    let inactive = users.len() - active_user_count(users);
    percentage_one_decimal(inactive, users.len())
}

/// Mean users per monthly cohort across a window, rounded down.
pub fn average_cohort_size(users: &[User], window_months: usize) -> usize {
    users.len().checked_div(window_months).unwrap_or(0)
}

// ============================================================================
// Sessions
// ============================================================================

/// Most recent session by date; the first one wins on ties.
pub fn latest_session(sessions: &[Session]) -> Option<&Session> {
    sessions.iter().fold(None, |latest: Option<&Session>, s| match latest {
        Some(l) if l.date >= s.date => Some(l),
        _ => Some(s),
    })
}

/// Attendees of the latest session relative to the active-user count.
pub fn participation_rate(sessions: &[Session], users: &[User]) -> u32 {
    let attendees = latest_session(sessions).map_or(0, |s| s.attendee_count as usize);
    percentage(attendees, active_user_count(users))
}

/// Mean session duration in whole minutes.
pub fn average_session_length(sessions: &[Session]) -> u32 {
    if sessions.is_empty() {
        return 0;
    }
    let total: u64 = sessions.iter().map(|s| s.duration as u64).sum();
    (total as f64 / sessions.len() as f64).round() as u32
}

// ============================================================================
// Lessons
// ============================================================================

/// Completions of `week` relative to the number of distinct users that
/// completed anything in `completions`.
pub fn week_completion_rate(completions: &[LessonCompletion], week: u8) -> u32 {
    let finished = completions.iter().filter(|c| c.week_number == week).count();
    let participants = distinct_count(completions, |c| c.user_id);
    percentage(finished, participants)
}

// ============================================================================
// Health
// ============================================================================

/// Distinct users with at least one health record relative to active users.
pub fn health_update_rate(health: &[HealthData], users: &[User]) -> u32 {
    let reporting = distinct_count(health, |d| d.user_id);
    percentage(reporting, active_user_count(users))
}
