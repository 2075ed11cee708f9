//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use blog_core::ports::PostRepository;
use blog_infra::InMemoryPostRepository;

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    /// Deadline for a single page fetch.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(posts: Arc<dyn PostRepository>, request_timeout: Duration) -> Self {
        Self {
            posts,
            request_timeout,
        }
    }

    /// Build the application state with appropriate implementations.
    ///
    /// Falls back to the in-memory repository when no database is configured
    /// or the connection cannot be established.
    pub async fn from_config(config: &AppConfig) -> Self {
        let posts = Self::connect(config).await;
        tracing::info!("Application state initialized");
        Self::new(posts, config.request_timeout)
    }

    #[cfg(feature = "postgres")]
    async fn connect(config: &AppConfig) -> Arc<dyn PostRepository> {
        use blog_infra::{DatabaseConnections, PostgresPostRepository};
        use migration::{Migrator, MigratorTrait};

        let Some(db_config) = config.database.as_ref() else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Arc::new(InMemoryPostRepository::new());
        };

        let connections = match DatabaseConnections::init(db_config).await {
            Ok(connections) => connections,
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                return Arc::new(InMemoryPostRepository::new());
            }
        };

        if config.auto_migrate {
            match Migrator::up(&connections.main, None).await {
                Ok(()) => tracing::info!("Database migrations applied"),
                Err(e) => tracing::error!(error = %e, "Failed to apply database migrations"),
            }
        }

        Arc::new(PostgresPostRepository::new(connections.main))
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect(_config: &AppConfig) -> Arc<dyn PostRepository> {
        tracing::info!("Running without postgres feature - using in-memory repository");
        Arc::new(InMemoryPostRepository::new())
    }
}
