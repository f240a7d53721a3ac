//! Breakdown tallies
//!
//! Counts over small closed enumerations (content types, subscription plans,
//! program weeks) plus revenue per product. Every entry of an enumeration is
//! always present, so empty input gives all-zero tallies.

use std::collections::BTreeMap;

use serde::Serialize;

use shared::models::{
    ContentInteraction, ContentType, LessonCompletion, PROGRAM_WEEKS, Sale, SubscriptionPlan, User,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentTypeCounts {
    pub video: usize,
    pub pdf: usize,
    pub journal: usize,
}

impl ContentTypeCounts {
    pub fn get(&self, content_type: ContentType) -> usize {
        match content_type {
            ContentType::Video => self.video,
            ContentType::Pdf => self.pdf,
            ContentType::Journal => self.journal,
        }
    }

    pub fn total(&self) -> usize {
        self.video + self.pdf + self.journal
    }
}

pub fn content_type_counts(interactions: &[ContentInteraction]) -> ContentTypeCounts {
    interactions
        .iter()
        .fold(ContentTypeCounts::default(), |mut counts, i| {
            match i.content_type {
                ContentType::Video => counts.video += 1,
                ContentType::Pdf => counts.pdf += 1,
                ContentType::Journal => counts.journal += 1,
            }
            counts
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanCount {
    pub plan: SubscriptionPlan,
    pub label: &'static str,
    pub count: usize,
}

/// Users per subscription plan, in [`SubscriptionPlan::ALL`] order.
pub fn plan_breakdown(users: &[User]) -> Vec<PlanCount> {
    SubscriptionPlan::ALL
        .iter()
        .map(|&plan| PlanCount {
            plan,
            label: plan.label(),
            count: users.iter().filter(|u| u.plan == plan).count(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekCount {
    pub week: u8,
    pub count: usize,
}

/// Completion records per program week; weeks outside the program are ignored.
pub fn weekly_completions(completions: &[LessonCompletion]) -> Vec<WeekCount> {
    let mut buckets = [0usize; PROGRAM_WEEKS as usize];
    for c in completions {
        if (1..=PROGRAM_WEEKS).contains(&c.week_number) {
            buckets[(c.week_number - 1) as usize] += 1;
        }
    }
    buckets
        .iter()
        .enumerate()
        .map(|(i, &count)| WeekCount {
            week: i as u8 + 1,
            count,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRevenue {
    pub product: String,
    pub total: u64,
    pub sales: usize,
}

/// Revenue and sale count per product, sorted by product name.
pub fn revenue_by_product(sales: &[Sale]) -> Vec<ProductRevenue> {
    let mut by_product: BTreeMap<&str, (u64, usize)> = BTreeMap::new();
    for sale in sales {
        let entry = by_product.entry(sale.product.as_str()).or_default();
        entry.0 += sale.amount;
        entry.1 += 1;
    }
    by_product
        .into_iter()
        .map(|(product, (total, count))| ProductRevenue {
            product: product.to_string(),
            total,
            sales: count,
        })
        .collect()
}

pub fn total_revenue(sales: &[Sale]) -> u64 {
    sales.iter().map(|s| s.amount).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn interaction(id: i64, content_type: ContentType) -> ContentInteraction {
        ContentInteraction {
            id,
            user_id: 1,
            content_type,
            lesson_id: 1,
            week_number: 1,
            interaction_time: 300,
        }
    }

    fn sale(id: i64, product: &str, amount: u64) -> Sale {
        Sale {
            id,
            product: product.to_string(),
            amount,
            date: Utc.with_ymd_and_hms(2024, 1, id as u32, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_content_type_counts() {
        let interactions = vec![
            interaction(1, ContentType::Video),
            interaction(2, ContentType::Video),
            interaction(3, ContentType::Journal),
        ];
        let counts = content_type_counts(&interactions);
        assert_eq!(counts.get(ContentType::Video), 2);
        assert_eq!(counts.get(ContentType::Pdf), 0);
        assert_eq!(counts.get(ContentType::Journal), 1);
        assert_eq!(counts.total(), 3);

        assert_eq!(content_type_counts(&[]), ContentTypeCounts::default());
    }

    #[test]
    fn test_plan_breakdown_empty_has_every_plan() {
        let breakdown = plan_breakdown(&[]);
        assert_eq!(breakdown.len(), 4);
        assert!(breakdown.iter().all(|p| p.count == 0));
        assert_eq!(breakdown[3].label, "Free Trial");
    }

    #[test]
    fn test_weekly_completions_ignores_out_of_range_weeks() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let completion = |id, week| LessonCompletion {
            id,
            user_id: id,
            week_number: week,
            completed_at: at,
        };
        let weeks = weekly_completions(&[
            completion(1, 1),
            completion(2, 1),
            completion(3, 12),
            completion(4, 0),
            completion(5, 13),
        ]);
        assert_eq!(weeks.len(), 12);
        assert_eq!(weeks[0], WeekCount { week: 1, count: 2 });
        assert_eq!(weeks[11], WeekCount { week: 12, count: 1 });
        assert_eq!(weeks.iter().map(|w| w.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_revenue_by_product() {
        let sales = vec![
            sale(1, "Health Program 2", 500),
            sale(2, "Health Program 1", 1200),
            sale(3, "Health Program 2", 300),
        ];
        let revenue = revenue_by_product(&sales);
        assert_eq!(revenue.len(), 2);
        assert_eq!(revenue[0].product, "Health Program 1");
        assert_eq!(revenue[1].total, 800);
        assert_eq!(revenue[1].sales, 2);
        assert_eq!(total_revenue(&sales), 2000);
        assert!(revenue_by_product(&[]).is_empty());
    }
}
