//! Application state
//!
//! Holds the shared state for the Axum application including
//! the service context, backing pools, and configuration.

use std::sync::Arc;

use vidshare_cache::RedisPool;
use vidshare_common::{AppConfig, JwtService};
use vidshare_db::PgPool;
use vidshare_service::ServiceContext;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service_context: Arc<ServiceContext>,
    /// Kept for readiness probes; repositories hold their own handles
    db_pool: PgPool,
    redis_pool: RedisPool,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        service_context: ServiceContext,
        db_pool: PgPool,
        redis_pool: RedisPool,
        config: AppConfig,
    ) -> Self {
        Self {
            service_context: Arc::new(service_context),
            db_pool,
            redis_pool,
            config: Arc::new(config),
        }
    }

    pub fn service_context(&self) -> &ServiceContext {
        &self.service_context
    }

    pub fn db_pool(&self) -> &PgPool {
        &self.db_pool
    }

    pub fn redis_pool(&self) -> &RedisPool {
        &self.redis_pool
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn jwt_service(&self) -> &JwtService {
        self.service_context.jwt_service()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service_context", &self.service_context)
            .field("env", &self.config.app.env)
            .finish_non_exhaustive()
    }
}
