//! Sample data
//!
//! Fills an empty [`MemStorage`] with a small, plausible program so the
//! dashboard has something to show on first start. Pass a seed for
//! reproducible data.

use chrono::{DateTime, Datelike, Duration, Months, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::models::{
    ContentType, NewContentInteraction, NewHealthData, NewLesson, NewLessonCompletion, NewMetric,
    NewSale, NewSession, NewUser, PROGRAM_WEEKS, SubscriptionPlan,
};

use super::{MemStorage, StorageResult};

const SAMPLE_METRICS: [(&str, f64, &str); 9] = [
    ("Total Users", 15423.0, "users"),
    ("Active Users", 8762.0, "users"),
    ("Revenue", 45290.0, "finance"),
    ("Growth", 23.0, "finance"),
    ("Conversion Rate", 68.0, "funnel"),
    ("Session Attendance", 456.0, "engagement"),
    ("Intro Call Rate", 60.0, "funnel"),
    ("Profile Completion", 80.0, "funnel"),
    ("First Lesson", 40.0, "engagement"),
];

const LESSON_TITLES: [&str; PROGRAM_WEEKS as usize] = [
    "Welcome to the Program",
    "Understanding Your Metabolism",
    "Building Balanced Meals",
    "Mindful Eating",
    "Movement You Enjoy",
    "Sleep and Recovery",
    "Managing Stress",
    "Reading Food Labels",
    "Eating Out with Confidence",
    "Handling Setbacks",
    "Long-Term Habits",
    "Your Plan Going Forward",
];

const SAMPLE_USERS: u32 = 20;

/// Counts of what [`seed_sample_data`] inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub metrics: usize,
    pub sales: usize,
    pub users: usize,
    pub sessions: usize,
    pub health_data: usize,
    pub lessons: usize,
    pub completions: usize,
    pub interactions: usize,
}

fn jan_2024(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn feb_2024(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 2, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Insert the sample program into `storage`; user join dates fall in the six
/// calendar months ending with the month of `now`.
pub fn seed_sample_data(
    storage: &MemStorage,
    seed: Option<u64>,
    now: DateTime<Utc>,
) -> StorageResult<SeedSummary> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut summary = SeedSummary::default();

    for (name, value, category) in SAMPLE_METRICS {
        storage.insert_metric(NewMetric {
            name: name.to_string(),
            value,
            category: category.to_string(),
        });
        summary.metrics += 1;
    }

    for i in 0..10u32 {
        storage.insert_sale(NewSale {
            product: format!("Health Program {}", i % 3 + 1),
            amount: rng.gen_range(0..10_000),
            date: jan_2024(i + 1),
        });
        summary.sales += 1;
    }

    let mut users = Vec::new();
    for i in 0..SAMPLE_USERS {
        // A day within the calendar month `i % 6` months back
        let anchor = now.checked_sub_months(Months::new(i % 6)).unwrap_or(now);
        let back = rng.gen_range(0..20u32).min(anchor.day0());
        let join_date = anchor - Duration::days(i64::from(back));
        let last_active = rng.gen_bool(0.8).then(|| {
            let days_since = (now - join_date).num_days().max(0);
            join_date + Duration::days(rng.gen_range(0..=days_since))
        });
        let user = storage.insert_user(NewUser {
            name: format!("User {}", i + 1),
            email: format!("user{}@example.com", i + 1),
            onboarding_completed: rng.gen_bool(0.7),
            plan: SubscriptionPlan::ALL[rng.gen_range(0..SubscriptionPlan::ALL.len())],
            join_date: Some(join_date),
            last_active,
        });
        users.push(user);
        summary.users += 1;
    }

    for i in 0..5u32 {
        storage.insert_session(NewSession {
            name: format!("Group Session {}", i + 1),
            attendee_count: rng.gen_range(10..60),
            date: feb_2024(i + 1),
            duration: 60,
        });
        summary.sessions += 1;
    }

    for i in 0..10u32 {
        storage.insert_health_data(NewHealthData {
            user_id: users[(i % 5) as usize].id,
            weight: Some(70_000 + rng.gen_range(0..20_000)),
            waist_circumference: Some(800 + rng.gen_range(0..200)),
            blood_glucose: Some(80 + rng.gen_range(0..40)),
            date: jan_2024(i + 1),
        })?;
        summary.health_data += 1;
    }

    let mut lessons = Vec::new();
    for (week, title) in (1..=PROGRAM_WEEKS).zip(LESSON_TITLES) {
        let content_type = ContentType::ALL[(week as usize - 1) % ContentType::ALL.len()];
        let lesson = storage.insert_lesson(NewLesson {
            week_number: week,
            title: title.to_string(),
            content_type,
            average_rating: (rng.gen_range(3.5..5.0_f64) * 10.0).round() / 10.0,
            total_completions: 0,
            average_time_spent: rng.gen_range(300..1800),
        });
        lessons.push(lesson);
        summary.lessons += 1;
    }

    // Each user works through the program in order, one week at a time
    for user in &users {
        let reached = rng.gen_range(0..=PROGRAM_WEEKS);
        for lesson in lessons.iter().take(reached as usize) {
            let completed_at =
                (user.join_date + Duration::days(7 * lesson.week_number as i64)).min(now);
            storage.insert_lesson_completion(NewLessonCompletion {
                user_id: user.id,
                week_number: lesson.week_number,
                completed_at,
            })?;
            summary.completions += 1;

            storage.insert_content_interaction(NewContentInteraction {
                user_id: user.id,
                content_type: lesson.content_type,
                lesson_id: lesson.id,
                week_number: lesson.week_number,
                interaction_time: rng.gen_range(60..1800),
            })?;
            summary.interactions += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use analytics_engine::cohort::YearMonth;

    #[tokio::test]
    async fn test_seed_counts() {
        let storage = MemStorage::new();
        let summary = seed_sample_data(&storage, Some(7), Utc::now()).unwrap();

        assert_eq!(summary.metrics, 9);
        assert_eq!(summary.sales, 10);
        assert_eq!(summary.users, 20);
        assert_eq!(summary.sessions, 5);
        assert_eq!(summary.health_data, 10);
        assert_eq!(summary.lessons, 12);
        assert_eq!(summary.completions, summary.interactions);

        let completions = storage.get_lesson_completions().await.unwrap();
        assert_eq!(completions.len(), summary.completions);
        assert!(completions.iter().all(|c| (1..=PROGRAM_WEEKS).contains(&c.week_number)));
    }

    #[tokio::test]
    async fn test_fixed_seed_is_reproducible() {
        let now = Utc::now();
        let a = MemStorage::new();
        let b = MemStorage::new();
        seed_sample_data(&a, Some(42), now).unwrap();
        seed_sample_data(&b, Some(42), now).unwrap();

        assert_eq!(a.get_sales().await.unwrap(), b.get_sales().await.unwrap());
        assert_eq!(a.get_users().await.unwrap(), b.get_users().await.unwrap());
    }

    #[tokio::test]
    async fn test_users_join_within_window() {
        let now = Utc::now();
        let storage = MemStorage::new();
        seed_sample_data(&storage, Some(1), now).unwrap();
        let window = YearMonth::trailing(&now, 6);

        for user in storage.get_users().await.unwrap() {
            assert!(user.join_date <= now);
            assert!(window.contains(&YearMonth::of(&user.join_date)));
            if let Some(active) = user.last_active {
                assert!(active >= user.join_date && active <= now);
            }
        }
    }
}
