use std::env;

use tracing::info;

/// Default dashboard page. Overridable for staging mirrors and tests.
const DEFAULT_SOURCE_URL: &str = "https://forward.ny.gov/regional-monitoring-chart";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the dashboard page carrying the metrics table.
    pub source_url: String,

    /// SQLite database URL for the snapshot store.
    pub database_url: String,

    // Web server
    pub host: String,
    pub port: u16,

    /// Force a scrape cycle even when a snapshot already exists for today.
    /// The fingerprint dedup check still applies.
    pub always_refetch: bool,

    /// Upper bound on a single page fetch, in seconds.
    pub fetch_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    /// Every variable has a usable default; nothing is required.
    pub fn from_env() -> Self {
        Self {
            source_url: env::var("SOURCE_URL").unwrap_or_else(|_| DEFAULT_SOURCE_URL.to_string()),
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/regionwatch.db".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("PORT must be a number"),
            always_refetch: env::var("ALWAYS_REFETCH")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("FETCH_TIMEOUT_SECS must be a number"),
        }
    }

    /// Log the effective configuration at startup.
    pub fn log_summary(&self) {
        info!(
            source_url = self.source_url.as_str(),
            database_url = self.database_url.as_str(),
            always_refetch = self.always_refetch,
            fetch_timeout_secs = self.fetch_timeout_secs,
            "Configuration loaded"
        );
    }
}
