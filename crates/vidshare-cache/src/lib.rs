//! # vidshare-cache
//!
//! Redis layer holding refresh-token sessions.
//!
//! - **Connection Pool**: managed Redis connection pool with deadpool
//! - **Sessions**: refresh tokens keyed by `jti`, indexed per user so a
//!   logout can revoke every device at once
//!
//! ## Example
//!
//! ```ignore
//! use vidshare_cache::{RedisPool, RefreshTokenStore, TokenStore};
//!
//! let pool = RedisPool::from_config(&config.redis)?;
//! let sessions = RefreshTokenStore::with_ttl(pool, 604_800);
//! sessions.store(&pair.refresh_jti, user_id).await?;
//! ```

pub mod pool;
pub mod session;

pub use pool::{CacheError, CacheResult, RedisPool, RedisPoolConfig};
pub use session::{RefreshTokenData, RefreshTokenStore, TokenStore};
