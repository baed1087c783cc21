//! Refresh token storage in Redis.
//!
//! Each issued refresh token is recorded under its `jti` with the token's
//! lifetime as TTL. A refresh consumes the record, so a token can be
//! exchanged at most once.

use async_trait::async_trait;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use vidshare_core::Snowflake;

use crate::pool::{CacheResult, RedisPool};

const REFRESH_TOKEN_PREFIX: &str = "refresh_token:";
const USER_TOKENS_PREFIX: &str = "user_tokens:";

/// Default TTL for refresh tokens (7 days)
const DEFAULT_REFRESH_TOKEN_TTL: u64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenData {
    pub user_id: Snowflake,
    /// Unix epoch seconds
    pub created_at: i64,
}

impl RefreshTokenData {
    #[must_use]
    pub fn new(user_id: Snowflake) -> Self {
        Self {
            user_id,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}

/// Where issued refresh tokens are tracked
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Record a freshly issued token
    async fn store(&self, jti: &str, user_id: Snowflake) -> CacheResult<()>;

    /// Remove and return the token's record; `None` if unknown, expired, or
    /// already used
    async fn consume(&self, jti: &str) -> CacheResult<Option<RefreshTokenData>>;

    /// Returns whether a live token was removed
    async fn revoke(&self, jti: &str) -> CacheResult<bool>;

    /// Logout from all devices; returns the number of tokens revoked
    async fn revoke_all_for_user(&self, user_id: Snowflake) -> CacheResult<u64>;
}

/// Redis-backed [`TokenStore`]
#[derive(Clone, Debug)]
pub struct RefreshTokenStore {
    pool: RedisPool,
    ttl_seconds: u64,
}

impl RefreshTokenStore {
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self::with_ttl(pool, DEFAULT_REFRESH_TOKEN_TTL)
    }

    #[must_use]
    pub fn with_ttl(pool: RedisPool, ttl_seconds: u64) -> Self {
        Self { pool, ttl_seconds }
    }

    fn key(jti: &str) -> String {
        format!("{REFRESH_TOKEN_PREFIX}{jti}")
    }

    fn user_key(user_id: Snowflake) -> String {
        format!("{USER_TOKENS_PREFIX}{user_id}")
    }
}

#[async_trait]
impl TokenStore for RefreshTokenStore {
    async fn store(&self, jti: &str, user_id: Snowflake) -> CacheResult<()> {
        let data = RefreshTokenData::new(user_id);
        self.pool
            .set_json(&Self::key(jti), &data, self.ttl_seconds)
            .await?;

        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;
        conn.sadd::<_, _, ()>(&user_key, jti).await?;
        conn.expire::<_, ()>(&user_key, self.ttl_seconds as i64)
            .await?;

        tracing::debug!(jti = %jti, user_id = %user_id, "Stored refresh token");
        Ok(())
    }

    async fn consume(&self, jti: &str) -> CacheResult<Option<RefreshTokenData>> {
        let data: Option<RefreshTokenData> = self.pool.take_json(&Self::key(jti)).await?;
        if let Some(data) = &data {
            let mut conn = self.pool.get().await?;
            conn.srem::<_, _, ()>(Self::user_key(data.user_id), jti)
                .await?;
        }
        Ok(data)
    }

    async fn revoke(&self, jti: &str) -> CacheResult<bool> {
        let revoked = self.consume(jti).await?.is_some();
        if revoked {
            tracing::debug!(jti = %jti, "Revoked refresh token");
        }
        Ok(revoked)
    }

    async fn revoke_all_for_user(&self, user_id: Snowflake) -> CacheResult<u64> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.pool.get().await?;
        let jtis: Vec<String> = conn.smembers(&user_key).await?;

        let keys: Vec<String> = jtis.iter().map(|jti| Self::key(jti)).collect();
        let count = self.pool.delete_many(&keys).await?;
        conn.del::<_, ()>(&user_key).await?;

        tracing::info!(user_id = %user_id, count, "Revoked all refresh tokens for user");
        Ok(count)
    }
}
