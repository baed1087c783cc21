//! PostgreSQL connection pool and schema migrations

use std::path::Path;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;
use vidshare_common::DatabaseConfig;

/// Connection lifecycle limits applied on top of [`DatabaseConfig`]
#[derive(Debug, Clone, Copy)]
pub struct PoolTimeouts {
    /// Maximum time to wait for a connection
    pub acquire: Duration,
    /// Maximum idle time before a connection is closed
    pub idle: Duration,
    /// Maximum lifetime of a connection
    pub max_lifetime: Duration,
}

impl Default for PoolTimeouts {
    fn default() -> Self {
        Self {
            acquire: Duration::from_secs(10),
            idle: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Create a new PostgreSQL connection pool
pub async fn create_pool(
    config: &DatabaseConfig,
    timeouts: PoolTimeouts,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(timeouts.acquire)
        .idle_timeout(timeouts.idle)
        .max_lifetime(timeouts.max_lifetime)
        .connect(&config.url)
        .await
}

/// Apply every pending migration found in `dir`
pub async fn run_migrations(pool: &PgPool, dir: impl AsRef<Path>) -> Result<(), MigrateError> {
    let dir = dir.as_ref();
    let migrator = Migrator::new(dir).await?;
    info!(
        dir = %dir.display(),
        available = migrator.iter().count(),
        "Applying database migrations"
    );
    migrator.run(pool).await
}
