use analytics_engine::DEFAULT_COHORT_WINDOW;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | HTTP_PORT | 5000 | HTTP listen port |
/// | ENVIRONMENT | development | development, staging or production |
/// | LOG_LEVEL | info | log level when `RUST_LOG` is unset |
/// | LOG_DIR | - | write daily-rolled log files here |
/// | SEED_SAMPLE_DATA | true | fill the in-memory store at startup |
/// | SAMPLE_DATA_SEED | - | fixed RNG seed for the sample data |
/// | COHORT_WINDOW_MONTHS | 6 | cohort window when the request gives none |
#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub seed_sample_data: bool,
    pub sample_data_seed: Option<u64>,
    pub cohort_window_months: usize,
}

impl Config {
    /// Load from the environment, falling back to defaults for anything unset
    /// or unparsable.
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            seed_sample_data: std::env::var("SEED_SAMPLE_DATA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            sample_data_seed: std::env::var("SAMPLE_DATA_SEED")
                .ok()
                .and_then(|v| v.parse().ok()),
            cohort_window_months: std::env::var("COHORT_WINDOW_MONTHS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|w| (1..=crate::api::analytics::MAX_COHORT_WINDOW).contains(w))
                .unwrap_or(DEFAULT_COHORT_WINDOW),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
