use serde::Serialize;

use shared::models::{ContentType, Lesson, LessonCompletion};

use crate::breakdown::{ContentTypeCounts, WeekCount, content_type_counts, weekly_completions};
use crate::period::Snapshot;
use crate::ratio::{distinct_count, week_completion_rate};

use super::Kpi;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonRow {
    pub week: u8,
    pub title: String,
    pub content_type: ContentType,
    pub average_rating: f64,
    pub total_completions: u32,
    /// Average time spent, whole minutes
    pub minutes: u32,
}

impl From<&Lesson> for LessonRow {
    fn from(lesson: &Lesson) -> Self {
        Self {
            week: lesson.week_number,
            title: lesson.title.clone(),
            content_type: lesson.content_type,
            average_rating: lesson.average_rating,
            total_completions: lesson.total_completions,
            minutes: (lesson.average_time_spent as f64 / 60.0).round() as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSummary {
    pub kpis: Vec<Kpi>,
    pub content_types: ContentTypeCounts,
    pub weekly_completions: Vec<WeekCount>,
    /// Ordered by week
    pub lessons: Vec<LessonRow>,
}

/// Content interactions are not dated, so only the week-1 KPI can carry a
/// trend.
pub fn engagement_summary(current: &Snapshot, previous: Option<&Snapshot>) -> EngagementSummary {
    let week_one = week_completion_rate(&current.completions, 1);
    let week_one_records: Vec<&LessonCompletion> = current
        .completions
        .iter()
        .filter(|c| c.week_number == 1)
        .collect();
    let week_one_users = distinct_count(&week_one_records, |c| c.user_id);
    let content_types = content_type_counts(&current.interactions);

    let mut lessons: Vec<LessonRow> = current.lessons.iter().map(LessonRow::from).collect();
    lessons.sort_by_key(|l| l.week);

    EngagementSummary {
        kpis: vec![
            Kpi::new(
                "Week 1 Completion",
                format!("{week_one}%"),
                format!("{week_one_users} users completed"),
            )
            .with_trend(
                week_one as f64,
                previous.map(|p| week_completion_rate(&p.completions, 1) as f64),
            ),
            Kpi::new(
                "Video Views",
                content_types.video.to_string(),
                "Total video interactions",
            ),
            Kpi::new(
                "PDF Downloads",
                content_types.pdf.to_string(),
                "Total PDF interactions",
            ),
            Kpi::new(
                "Journal Entries",
                content_types.journal.to_string(),
                "Total journal entries",
            ),
        ],
        content_types,
        weekly_completions: weekly_completions(&current.completions),
        lessons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shared::models::ContentInteraction;

    fn lesson(id: i64, week: u8, seconds: u32) -> Lesson {
        Lesson {
            id,
            week_number: week,
            title: format!("Week {week}"),
            content_type: ContentType::Video,
            average_rating: 4.2,
            total_completions: 30,
            average_time_spent: seconds,
        }
    }

    #[test]
    fn test_engagement_summary() {
        let at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let completion = |id, user_id, week| LessonCompletion {
            id,
            user_id,
            week_number: week,
            completed_at: at,
        };
        let current = Snapshot {
            completions: vec![
                completion(1, 1, 1),
                completion(2, 1, 1),
                completion(3, 2, 1),
                completion(4, 3, 2),
            ],
            interactions: vec![ContentInteraction {
                id: 1,
                user_id: 1,
                content_type: ContentType::Pdf,
                lesson_id: 1,
                week_number: 1,
                interaction_time: 120,
            }],
            lessons: vec![lesson(2, 3, 930), lesson(1, 1, 89)],
            ..Default::default()
        };

        let summary = engagement_summary(&current, None);
        // 3 week-1 records from 2 users, 3 users with any completion
        assert_eq!(summary.kpis[0].value, "100%");
        assert_eq!(summary.kpis[0].description, "2 users completed");
        assert_eq!(summary.kpis[2].value, "1");
        assert_eq!(summary.weekly_completions[1].count, 1);

        assert_eq!(summary.lessons[0].week, 1);
        assert_eq!(summary.lessons[0].minutes, 1);
        assert_eq!(summary.lessons[1].minutes, 16);
    }

    #[test]
    fn test_engagement_summary_empty() {
        let summary = engagement_summary(&Snapshot::default(), None);
        assert_eq!(summary.kpis[0].value, "0%");
        assert_eq!(summary.weekly_completions.len(), 12);
        assert!(summary.lessons.is_empty());
    }
}
