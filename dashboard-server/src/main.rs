use std::sync::Arc;

use chrono::Utc;
use dashboard_server::storage::seed::seed_sample_data;
use dashboard_server::{AppState, Config, MemStorage, api, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenv::dotenv().ok();

    let config = Config::from_env();
    logger::init_logger_with_file(
        &config.log_level,
        config.is_production(),
        config.log_dir.as_deref(),
    );

    tracing::info!("Starting dashboard-server (env: {})", config.environment);

    let storage = MemStorage::new();
    if config.seed_sample_data {
        let seeded = seed_sample_data(&storage, config.sample_data_seed, Utc::now())?;
        tracing::info!(
            users = seeded.users,
            lessons = seeded.lessons,
            completions = seeded.completions,
            "Sample data loaded"
        );
    }

    let addr = format!("0.0.0.0:{}", config.http_port);
    let state = AppState::new(Arc::new(storage), config);
    let app = api::build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("dashboard-server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("dashboard-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
