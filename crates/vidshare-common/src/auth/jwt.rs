//! JWT access and refresh tokens
//!
//! Access tokens are short-lived bearer tokens. Refresh tokens carry a
//! unique `jti` so the cache layer can track, rotate, and revoke them.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vidshare_core::Snowflake;

use crate::config::JwtConfig;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: TokenType,
    /// Unique token ID
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Snowflake, AppError> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    /// Seconds until expiry, never negative
    #[must_use]
    pub fn remaining_seconds(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

/// Tokens handed to the client after login, registration, or refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    /// `jti` of the refresh token, for the refresh-token store
    #[serde(skip)]
    pub refresh_jti: String,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64, refresh_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
            refresh_token_expiry,
        }
    }

    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(
            &config.secret,
            config.access_token_expiry,
            config.refresh_token_expiry,
        )
    }

    #[must_use]
    pub fn refresh_token_expiry(&self) -> i64 {
        self.refresh_token_expiry
    }

    pub fn generate_token_pair(&self, user_id: Snowflake) -> Result<TokenPair, AppError> {
        let (access_token, _) = self.encode_token(user_id, TokenType::Access)?;
        let (refresh_token, refresh_jti) = self.encode_token(user_id, TokenType::Refresh)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
            refresh_jti,
        })
    }

    /// Returns the encoded token together with its `jti`
    fn encode_token(
        &self,
        user_id: Snowflake,
        token_type: TokenType,
    ) -> Result<(String, String), AppError> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_token_expiry,
            TokenType::Refresh => self.refresh_token_expiry,
        };
        let jti = Uuid::new_v4().to_string();

        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl)).timestamp(),
            token_type,
            jti: jti.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("failed to encode JWT: {e}")))?;
        Ok((token, jti))
    }

    fn decode_token(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })?
            .claims;

        if claims.token_type != expected {
            return Err(AppError::InvalidToken);
        }
        Ok(claims)
    }

    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_token(token, TokenType::Access)
    }

    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_token(token, TokenType::Refresh)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 900, 604_800)
    }

    #[test]
    fn test_pair_round_trip() {
        let service = service();
        let user_id = Snowflake::new(4242);
        let pair = service.generate_token_pair(user_id).unwrap();

        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 900);

        let access = service.validate_access_token(&pair.access_token).unwrap();
        assert_eq!(access.user_id().unwrap(), user_id);

        let refresh = service.validate_refresh_token(&pair.refresh_token).unwrap();
        assert_eq!(refresh.jti, pair.refresh_jti);
        assert!(refresh.remaining_seconds() > 900);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let service = service();
        let pair = service.generate_token_pair(Snowflake::new(1)).unwrap();

        assert!(matches!(
            service.validate_access_token(&pair.refresh_token),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(
            service.validate_refresh_token(&pair.access_token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_every_refresh_token_has_fresh_jti() {
        let service = service();
        let a = service.generate_token_pair(Snowflake::new(1)).unwrap();
        let b = service.generate_token_pair(Snowflake::new(1)).unwrap();
        assert_ne!(a.refresh_jti, b.refresh_jti);
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let pair = service().generate_token_pair(Snowflake::new(1)).unwrap();
        let other = JwtService::new("a-different-secret-entirely", 900, 604_800);
        assert!(other.validate_access_token(&pair.access_token).is_err());
        assert!(matches!(
            service().validate_access_token("not.a.jwt"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_pair_serializes_camel_case_without_jti() {
        let pair = service().generate_token_pair(Snowflake::new(1)).unwrap();
        let json = serde_json::to_value(&pair).unwrap();
        assert!(json.get("accessToken").is_some());
        assert!(json.get("refreshJti").is_none());
    }
}
