//! # vidshare-db
//!
//! Database layer implementing the vidshare-core repository traits with
//! PostgreSQL via SQLx.
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vidshare_common::AppConfig;
//! use vidshare_core::SubjectRepository;
//! use vidshare_db::{create_pool, run_migrations, PgSubjectRepository, PoolTimeouts};
//!
//! async fn example(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&config.database, PoolTimeouts::default()).await?;
//!     run_migrations(&pool, &config.database.migrations_dir).await?;
//!     let subjects = PgSubjectRepository::new(pool);
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, PgPool, PoolTimeouts};
pub use repositories::{
    PgCommentRepository, PgSubjectRepository, PgUserRepository, PgVideoRepository,
};
