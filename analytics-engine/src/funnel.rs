//! Stage funnels
//!
//! Each stage's count is measured on its own from the raw collections. The
//! funnel never derives a stage from the one before it, so a later stage can
//! exceed an earlier one when the data says so.

use serde::Serialize;

use shared::models::{LessonCompletion, PROGRAM_WEEKS, User};

use crate::ratio::{distinct_count, percentage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStage {
    pub name: String,
    pub count: usize,
    /// Percent of the first stage
    pub of_first: u32,
    /// Percent of the preceding stage (of itself for the first stage)
    pub of_previous: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Funnel {
    pub stages: Vec<FunnelStage>,
}

impl Funnel {
    pub fn from_stages<I, S>(stages: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut built: Vec<FunnelStage> = Vec::new();
        let mut first = None;
        let mut previous = None;

        for (name, count) in stages {
            let first_count = *first.get_or_insert(count);
            let previous_count = previous.unwrap_or(count);
            built.push(FunnelStage {
                name: name.into(),
                count,
                of_first: percentage(count, first_count),
                of_previous: percentage(count, previous_count),
            });
            previous = Some(count);
        }

        Self { stages: built }
    }
}

/// Sign-up to program completion.
///
/// Stages: all users, users that completed onboarding, distinct users with a
/// week-1 completion, distinct users with a final-week completion.
pub fn onboarding_funnel(users: &[User], completions: &[LessonCompletion]) -> Funnel {
    let distinct_in_week = |week: u8| {
        let in_week: Vec<&LessonCompletion> =
            completions.iter().filter(|c| c.week_number == week).collect();
        distinct_count(&in_week, |c| c.user_id)
    };

    Funnel::from_stages([
        ("Sign-ups", users.len()),
        (
            "Onboarding Completed",
            users.iter().filter(|u| u.onboarding_completed).count(),
        ),
        ("First Lesson Completed", distinct_in_week(1)),
        ("Program Completed", distinct_in_week(PROGRAM_WEEKS)),
    ])
}
