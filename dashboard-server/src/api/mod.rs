//! HTTP API
//!
//! - [`health`]: liveness
//! - [`entities`]: pass-through collection reads and validated inserts
//! - [`analytics`]: server-side page summaries

pub mod analytics;
pub mod entities;
pub mod health;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the router with every route registered (no middleware, no state)
pub fn build_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(entities::router())
        .merge(analytics::router())
}

/// Build the fully configured application
///
/// Used by both the HTTP server and in-process oneshot calls.
pub fn build_app(state: AppState) -> Router {
    build_router()
        // CORS - cross-origin requests from the dashboard client
        .layer(CorsLayer::permissive())
        // Trace - request spans at INFO
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
