//! Entity collection handlers
//!
//! `GET` returns the full collection as a bare JSON array, `POST` validates
//! the payload and returns the stored entity.

use axum::routing::get;
use axum::{
    Json, Router,
    extract::State,
};
use shared::AppResult;
use shared::models::{
    ContentInteraction, HealthData, Lesson, LessonCompletion, Metric, NewContentInteraction,
    NewHealthData, NewLesson, NewLessonCompletion, NewMetric, NewSale, NewSession, NewUser, Sale,
    Session, User,
};
use validator::Validate;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/metrics", get(list_metrics).post(create_metric))
        .route("/api/sales", get(list_sales).post(create_sale))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/sessions", get(list_sessions).post(create_session))
        .route("/api/health-data", get(list_health_data).post(create_health_data))
        .route("/api/lessons", get(list_lessons).post(create_lesson))
        .route(
            "/api/lesson-completions",
            get(list_lesson_completions).post(create_lesson_completion),
        )
        .route(
            "/api/content-interactions",
            get(list_content_interactions).post(create_content_interaction),
        )
}

// ============================================================================
// Metrics
// ============================================================================

/// GET /api/metrics
pub async fn list_metrics(State(state): State<AppState>) -> AppResult<Json<Vec<Metric>>> {
    Ok(Json(state.storage.get_metrics().await?))
}

/// POST /api/metrics
pub async fn create_metric(
    State(state): State<AppState>,
    Json(payload): Json<NewMetric>,
) -> AppResult<Json<Metric>> {
    payload.validate()?;
    let metric = state.storage.create_metric(payload).await?;
    tracing::info!(id = metric.id, name = %metric.name, "Metric created");
    Ok(Json(metric))
}

// ============================================================================
// Sales
// ============================================================================

/// GET /api/sales
pub async fn list_sales(State(state): State<AppState>) -> AppResult<Json<Vec<Sale>>> {
    Ok(Json(state.storage.get_sales().await?))
}

/// POST /api/sales
pub async fn create_sale(
    State(state): State<AppState>,
    Json(payload): Json<NewSale>,
) -> AppResult<Json<Sale>> {
    payload.validate()?;
    let sale = state.storage.create_sale(payload).await?;
    tracing::info!(id = sale.id, product = %sale.product, "Sale created");
    Ok(Json(sale))
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    Ok(Json(state.storage.get_users().await?))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> AppResult<Json<User>> {
    payload.validate()?;
    let user = state.storage.create_user(payload).await?;
    tracing::info!(id = user.id, "User created");
    Ok(Json(user))
}

// ============================================================================
// Sessions
// ============================================================================

/// GET /api/sessions
pub async fn list_sessions(State(state): State<AppState>) -> AppResult<Json<Vec<Session>>> {
    Ok(Json(state.storage.get_sessions().await?))
}

/// POST /api/sessions
pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<NewSession>,
) -> AppResult<Json<Session>> {
    payload.validate()?;
    let session = state.storage.create_session(payload).await?;
    tracing::info!(id = session.id, "Session created");
    Ok(Json(session))
}

// ============================================================================
// Health data
// ============================================================================

/// GET /api/health-data
pub async fn list_health_data(State(state): State<AppState>) -> AppResult<Json<Vec<HealthData>>> {
    Ok(Json(state.storage.get_health_data().await?))
}

/// POST /api/health-data
pub async fn create_health_data(
    State(state): State<AppState>,
    Json(payload): Json<NewHealthData>,
) -> AppResult<Json<HealthData>> {
    payload.validate()?;
    let data = state.storage.create_health_data(payload).await?;
    tracing::info!(id = data.id, user_id = data.user_id, "Health data recorded");
    Ok(Json(data))
}

// ============================================================================
// Lessons
// ============================================================================

/// GET /api/lessons
pub async fn list_lessons(State(state): State<AppState>) -> AppResult<Json<Vec<Lesson>>> {
    Ok(Json(state.storage.get_lessons().await?))
}

/// POST /api/lessons
pub async fn create_lesson(
    State(state): State<AppState>,
    Json(payload): Json<NewLesson>,
) -> AppResult<Json<Lesson>> {
    payload.validate()?;
    let lesson = state.storage.create_lesson(payload).await?;
    tracing::info!(id = lesson.id, week = lesson.week_number, "Lesson created");
    Ok(Json(lesson))
}

/// GET /api/lesson-completions
pub async fn list_lesson_completions(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<LessonCompletion>>> {
    Ok(Json(state.storage.get_lesson_completions().await?))
}

/// POST /api/lesson-completions
pub async fn create_lesson_completion(
    State(state): State<AppState>,
    Json(payload): Json<NewLessonCompletion>,
) -> AppResult<Json<LessonCompletion>> {
    payload.validate()?;
    let completion = state.storage.create_lesson_completion(payload).await?;
    tracing::info!(
        id = completion.id,
        user_id = completion.user_id,
        week = completion.week_number,
        "Lesson completion recorded"
    );
    Ok(Json(completion))
}

/// GET /api/content-interactions
pub async fn list_content_interactions(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ContentInteraction>>> {
    Ok(Json(state.storage.get_content_interactions().await?))
}

/// POST /api/content-interactions
pub async fn create_content_interaction(
    State(state): State<AppState>,
    Json(payload): Json<NewContentInteraction>,
) -> AppResult<Json<ContentInteraction>> {
    payload.validate()?;
    let interaction = state.storage.create_content_interaction(payload).await?;
    tracing::debug!(id = interaction.id, "Content interaction recorded");
    Ok(Json(interaction))
}
