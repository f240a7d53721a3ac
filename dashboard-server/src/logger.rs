//! Logging setup

use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// `RUST_LOG` wins over `log_level` when set. With `json` every event is one
/// JSON object per line. When `log_dir` exists, output goes to a daily-rolled
/// file there instead of stdout.
pub fn init_logger_with_file(log_level: &str, json: bool, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "dashboard_server={log_level},analytics_engine={log_level},tower_http={log_level}"
        ))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_appender = log_dir
        .map(Path::new)
        .filter(|dir| dir.exists())
        .map(|dir| tracing_appender::rolling::daily(dir, "dashboard-server"));

    // A second initialization (tests, embedding) keeps the first subscriber
    let _ = match (json, file_appender) {
        (true, Some(file)) => builder.json().with_writer(file).try_init(),
        (true, None) => builder.json().try_init(),
        (false, Some(file)) => builder.with_ansi(false).with_writer(file).try_init(),
        (false, None) => builder.try_init(),
    };
}
