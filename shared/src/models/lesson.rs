//! Lesson Models (curriculum, completions, content interactions)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Program length in weeks; every `week_number` lies in `1..=PROGRAM_WEEKS`
pub const PROGRAM_WEEKS: u8 = 12;

/// Lesson content format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Pdf,
    Journal,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [ContentType::Video, ContentType::Pdf, ContentType::Journal];
}

/// Curriculum entry with aggregate engagement figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: i64,
    pub week_number: u8,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// 1.0 ..= 5.0
    pub average_rating: f64,
    pub total_completions: u32,
    /// Seconds
    pub average_time_spent: u32,
}

/// A user finishing the lesson of a given week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonCompletion {
    pub id: i64,
    pub user_id: i64,
    pub week_number: u8,
    pub completed_at: DateTime<Utc>,
}

/// A user engaging with one piece of lesson content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInteraction {
    pub id: i64,
    pub user_id: i64,
    pub content_type: ContentType,
    pub lesson_id: i64,
    pub week_number: u8,
    /// Seconds
    pub interaction_time: u32,
}

/// Create lesson payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewLesson {
    #[validate(range(min = 1, max = 12))]
    pub week_number: u8,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    #[validate(range(min = 1.0, max = 5.0))]
    pub average_rating: f64,
    #[serde(default)]
    pub total_completions: u32,
    #[serde(default)]
    pub average_time_spent: u32,
}

/// Create lesson completion payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewLessonCompletion {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(range(min = 1, max = 12))]
    pub week_number: u8,
    pub completed_at: DateTime<Utc>,
}

/// Create content interaction payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewContentInteraction {
    #[validate(range(min = 1))]
    pub user_id: i64,
    pub content_type: ContentType,
    #[validate(range(min = 1))]
    pub lesson_id: i64,
    #[validate(range(min = 1, max = 12))]
    pub week_number: u8,
    pub interaction_time: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_type_field_name() {
        let json = r#"{
            "id": 1,
            "weekNumber": 3,
            "title": "Mindful Eating",
            "type": "pdf",
            "averageRating": 4.5,
            "totalCompletions": 12,
            "averageTimeSpent": 900
        }"#;
        let lesson: Lesson = serde_json::from_str(json).unwrap();
        assert_eq!(lesson.content_type, ContentType::Pdf);
        assert_eq!(lesson.week_number, 3);
    }

    #[test]
    fn test_week_number_bounds() {
        let ok = NewLessonCompletion {
            user_id: 1,
            week_number: PROGRAM_WEEKS,
            completed_at: Utc::now(),
        };
        assert!(ok.validate().is_ok());

        let too_late = NewLessonCompletion {
            week_number: PROGRAM_WEEKS + 1,
            ..ok.clone()
        };
        assert!(too_late.validate().is_err());

        let zero = NewLessonCompletion { week_number: 0, ..ok };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_rating_bounds() {
        let lesson = NewLesson {
            week_number: 1,
            title: "Welcome".into(),
            content_type: ContentType::Video,
            average_rating: 5.5,
            total_completions: 0,
            average_time_spent: 0,
        };
        assert!(lesson.validate().is_err());
    }
}
