//! Server setup and initialization
//!
//! Provides the application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use vidshare_cache::{RedisPool, RefreshTokenStore};
use vidshare_common::{AppConfig, AppError, JwtService};
use vidshare_core::SnowflakeGenerator;
use vidshare_db::{
    create_pool, run_migrations, PgCommentRepository, PgSubjectRepository, PgUserRepository,
    PgVideoRepository, PoolTimeouts,
};
use vidshare_service::{seed_demo_data, ServiceContext};

use crate::middleware::{apply_middleware, apply_rate_limit};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// # Errors
/// Returns `AppError::Config` when the rate limit settings are invalid
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();
    let api = apply_rate_limit(create_router(), &config.rate_limit)?;
    let router = health_routes().merge(api);
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    Ok(router.with_state(state))
}

/// Connect to PostgreSQL and Redis, migrate, and wire the services
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database, PoolTimeouts::default())
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(format!("migration failed: {e}")))?;
    }

    info!("Connecting to Redis...");
    let redis_pool =
        RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis pool ready");

    let refresh_ttl = u64::try_from(config.jwt.refresh_token_expiry)
        .map_err(|_| AppError::Config("JWT refresh token expiry must be positive".into()))?;
    let token_store = RefreshTokenStore::with_ttl(redis_pool.clone(), refresh_ttl);

    let service_context = ServiceContext::builder()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .video_repo(Arc::new(PgVideoRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .subject_repo(Arc::new(PgSubjectRepository::new(pool.clone())))
        .token_store(Arc::new(token_store))
        .jwt_service(Arc::new(JwtService::from_config(&config.jwt)))
        .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
        .reactions(config.reactions.clone())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    if config.app.seed_demo_data {
        let report = seed_demo_data(&service_context).await?;
        info!(
            users = report.users,
            videos = report.videos,
            "Demo data seeding finished"
        );
    }

    Ok(AppState::new(service_context, pool, redis_pool, config))
}

/// Serve `app` on an already bound listener until a shutdown signal
///
/// Peer addresses are exposed so per-IP rate limiting can key on them.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), AppError> {
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(anyhow::anyhow!("server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("failed to bind to {addr}: {e}")))?;
    info!("Server listening on http://{addr}");

    serve(listener, app).await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}
