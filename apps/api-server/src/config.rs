//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use blog_infra::database::DatabaseConfig;
use blog_infra::RateLimitConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory repository.
    pub database: Option<DatabaseConfig>,
    /// Apply pending migrations before serving.
    pub auto_migrate: bool,
    /// Deadline for a single page fetch.
    pub request_timeout: Duration,
    pub keep_alive: Duration,
    pub shutdown_timeout: Duration,
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.is_empty())
            .map(|url| {
                let mut config = DatabaseConfig::new(url);
                config.max_connections = parsed("DB_MAX_CONNECTIONS", 100);
                config.min_connections = parsed("DB_MIN_CONNECTIONS", 10);
                config
            });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT", 8080),
            database,
            auto_migrate: flag("AUTO_MIGRATE", true),
            request_timeout: Duration::from_secs(parsed("REQUEST_TIMEOUT_SECS", 15)),
            keep_alive: Duration::from_secs(parsed("KEEP_ALIVE_SECS", 75)),
            shutdown_timeout: Duration::from_secs(parsed("SHUTDOWN_TIMEOUT_SECS", 30)),
            rate_limit: RateLimitConfig {
                max_requests: parsed("RATE_LIMIT_MAX_REQUESTS", 100),
                window: Duration::from_secs(parsed("RATE_LIMIT_WINDOW_SECS", 60)),
            },
        }
    }
}

fn parsed<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn flag(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| !matches!(v.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off"))
        .unwrap_or(default)
}
