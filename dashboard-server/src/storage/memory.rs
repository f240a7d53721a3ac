//! In-memory store

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use shared::models::{
    ContentInteraction, HealthData, Lesson, LessonCompletion, Metric, NewContentInteraction,
    NewHealthData, NewLesson, NewLessonCompletion, NewMetric, NewSale, NewSession, NewUser, Sale,
    Session, User,
};

use super::{Storage, StorageError, StorageResult};

/// One entity table: rows keyed by id, ids handed out from 1 upward
struct Table<T> {
    rows: RwLock<BTreeMap<i64, T>>,
    next_id: AtomicI64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Snapshot of every row in id order
    fn all(&self) -> Vec<T> {
        self.rows.read().values().cloned().collect()
    }

    fn contains(&self, id: i64) -> bool {
        self.rows.read().contains_key(&id)
    }

    fn insert_with(&self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let row = build(id);
        self.rows.write().insert(id, row.clone());
        row
    }
}

/// Process-local store; contents are lost on restart
///
/// Rows referencing a user or lesson are only accepted when that user or
/// lesson exists.
pub struct MemStorage {
    metrics: Table<Metric>,
    sales: Table<Sale>,
    users: Table<User>,
    sessions: Table<Session>,
    health_data: Table<HealthData>,
    lessons: Table<Lesson>,
    completions: Table<LessonCompletion>,
    interactions: Table<ContentInteraction>,
}

impl MemStorage {
    /// Empty store
    pub fn new() -> Self {
        Self {
            metrics: Table::new(),
            sales: Table::new(),
            users: Table::new(),
            sessions: Table::new(),
            health_data: Table::new(),
            lessons: Table::new(),
            completions: Table::new(),
            interactions: Table::new(),
        }
    }

    fn require_user(&self, id: i64) -> StorageResult<()> {
        if self.users.contains(id) {
            Ok(())
        } else {
            Err(StorageError::NotFound(format!("User {id}")))
        }
    }

    pub fn insert_metric(&self, data: NewMetric) -> Metric {
        self.metrics.insert_with(|id| Metric {
            id,
            name: data.name,
            value: data.value,
            category: data.category,
            timestamp: Utc::now(),
        })
    }

    pub fn insert_sale(&self, data: NewSale) -> Sale {
        self.sales.insert_with(|id| Sale {
            id,
            product: data.product,
            amount: data.amount,
            date: data.date,
        })
    }

    pub fn insert_user(&self, data: NewUser) -> User {
        self.users.insert_with(|id| User {
            id,
            name: data.name,
            email: data.email,
            onboarding_completed: data.onboarding_completed,
            plan: data.plan,
            join_date: data.join_date.unwrap_or_else(Utc::now),
            last_active: data.last_active,
        })
    }

    pub fn insert_session(&self, data: NewSession) -> Session {
        self.sessions.insert_with(|id| Session {
            id,
            name: data.name,
            attendee_count: data.attendee_count,
            date: data.date,
            duration: data.duration,
        })
    }

    pub fn insert_health_data(&self, data: NewHealthData) -> StorageResult<HealthData> {
        self.require_user(data.user_id)?;
        Ok(self.health_data.insert_with(|id| HealthData {
            id,
            user_id: data.user_id,
            weight: data.weight,
            waist_circumference: data.waist_circumference,
            blood_glucose: data.blood_glucose,
            date: data.date,
        }))
    }

    pub fn insert_lesson(&self, data: NewLesson) -> Lesson {
        self.lessons.insert_with(|id| Lesson {
            id,
            week_number: data.week_number,
            title: data.title,
            content_type: data.content_type,
            average_rating: data.average_rating,
            total_completions: data.total_completions,
            average_time_spent: data.average_time_spent,
        })
    }

    pub fn insert_lesson_completion(
        &self,
        data: NewLessonCompletion,
    ) -> StorageResult<LessonCompletion> {
        self.require_user(data.user_id)?;
        Ok(self.completions.insert_with(|id| LessonCompletion {
            id,
            user_id: data.user_id,
            week_number: data.week_number,
            completed_at: data.completed_at,
        }))
    }

    pub fn insert_content_interaction(
        &self,
        data: NewContentInteraction,
    ) -> StorageResult<ContentInteraction> {
        self.require_user(data.user_id)?;
        if !self.lessons.contains(data.lesson_id) {
            return Err(StorageError::NotFound(format!("Lesson {}", data.lesson_id)));
        }
        Ok(self.interactions.insert_with(|id| ContentInteraction {
            id,
            user_id: data.user_id,
            content_type: data.content_type,
            lesson_id: data.lesson_id,
            week_number: data.week_number,
            interaction_time: data.interaction_time,
        }))
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_metrics(&self) -> StorageResult<Vec<Metric>> {
        Ok(self.metrics.all())
    }

    async fn create_metric(&self, data: NewMetric) -> StorageResult<Metric> {
        Ok(self.insert_metric(data))
    }

    async fn get_sales(&self) -> StorageResult<Vec<Sale>> {
        Ok(self.sales.all())
    }

    async fn create_sale(&self, data: NewSale) -> StorageResult<Sale> {
        Ok(self.insert_sale(data))
    }

    async fn get_users(&self) -> StorageResult<Vec<User>> {
        Ok(self.users.all())
    }

    async fn create_user(&self, data: NewUser) -> StorageResult<User> {
        Ok(self.insert_user(data))
    }

    async fn get_sessions(&self) -> StorageResult<Vec<Session>> {
        Ok(self.sessions.all())
    }

    async fn create_session(&self, data: NewSession) -> StorageResult<Session> {
        Ok(self.insert_session(data))
    }

    async fn get_health_data(&self) -> StorageResult<Vec<HealthData>> {
        Ok(self.health_data.all())
    }

    async fn create_health_data(&self, data: NewHealthData) -> StorageResult<HealthData> {
        self.insert_health_data(data)
    }

    async fn get_lessons(&self) -> StorageResult<Vec<Lesson>> {
        Ok(self.lessons.all())
    }

    async fn create_lesson(&self, data: NewLesson) -> StorageResult<Lesson> {
        Ok(self.insert_lesson(data))
    }

    async fn get_lesson_completions(&self) -> StorageResult<Vec<LessonCompletion>> {
        Ok(self.completions.all())
    }

    async fn create_lesson_completion(
        &self,
        data: NewLessonCompletion,
    ) -> StorageResult<LessonCompletion> {
        self.insert_lesson_completion(data)
    }

    async fn get_content_interactions(&self) -> StorageResult<Vec<ContentInteraction>> {
        Ok(self.interactions.all())
    }

    async fn create_content_interaction(
        &self,
        data: NewContentInteraction,
    ) -> StorageResult<ContentInteraction> {
        self.insert_content_interaction(data)
    }
}
