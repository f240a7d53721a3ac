//! Storage
//!
//! The [`Storage`] trait is the only way handlers reach data, so the
//! in-memory store can be swapped for a persistent backend without touching
//! the API layer.

mod memory;
pub mod seed;

pub use memory::MemStorage;

use async_trait::async_trait;
use shared::models::{
    ContentInteraction, HealthData, Lesson, LessonCompletion, Metric, NewContentInteraction,
    NewHealthData, NewLesson, NewLessonCompletion, NewMetric, NewSale, NewSession, NewUser, Sale,
    Session, User,
};
use shared::AppError;
use thiserror::Error;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => AppError::not_found(what),
            StorageError::Backend(msg) => AppError::storage(msg),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Fetch-all and insert per entity type
///
/// Reads return the whole collection; inserts assign the id (and any
/// defaulted timestamps) and return the stored entity.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_metrics(&self) -> StorageResult<Vec<Metric>>;
    async fn create_metric(&self, data: NewMetric) -> StorageResult<Metric>;

    async fn get_sales(&self) -> StorageResult<Vec<Sale>>;
    async fn create_sale(&self, data: NewSale) -> StorageResult<Sale>;

    async fn get_users(&self) -> StorageResult<Vec<User>>;
    async fn create_user(&self, data: NewUser) -> StorageResult<User>;

    async fn get_sessions(&self) -> StorageResult<Vec<Session>>;
    async fn create_session(&self, data: NewSession) -> StorageResult<Session>;

    async fn get_health_data(&self) -> StorageResult<Vec<HealthData>>;
    async fn create_health_data(&self, data: NewHealthData) -> StorageResult<HealthData>;

    async fn get_lessons(&self) -> StorageResult<Vec<Lesson>>;
    async fn create_lesson(&self, data: NewLesson) -> StorageResult<Lesson>;

    async fn get_lesson_completions(&self) -> StorageResult<Vec<LessonCompletion>>;
    async fn create_lesson_completion(
        &self,
        data: NewLessonCompletion,
    ) -> StorageResult<LessonCompletion>;

    async fn get_content_interactions(&self) -> StorageResult<Vec<ContentInteraction>>;
    async fn create_content_interaction(
        &self,
        data: NewContentInteraction,
    ) -> StorageResult<ContentInteraction>;
}
