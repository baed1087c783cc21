//! Authentication service
//!
//! Handles user registration, login, token refresh, and logout.

use tracing::{info, instrument, warn};
use validator::Validate;
use vidshare_common::{validate_password_strength, AppError, TokenPair};
use vidshare_core::{DomainError, Snowflake, User};

use crate::dto::{
    AuthResponse, CurrentUserResponse, LoginRequest, LogoutRequest, RefreshTokenRequest,
    RegisterRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;
        validate_password_strength(&request.password)?;

        let username = request.username.trim().to_string();
        let email = request.email.trim().to_lowercase();

        if self.ctx.user_repo().email_exists(&email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.user_repo().username_exists(&username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = self.ctx.password_service().hash(&request.password)?;

        let user = User::new(self.ctx.generate_id(), username, email);
        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user.id, "User registered");

        self.issue_tokens(user).await
    }

    /// Login with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        request.validate()?;

        let user = self
            .ctx
            .user_repo()
            .find_by_email(request.email.trim())
            .await?
            .ok_or_else(|| {
                warn!("Login failed: unknown email");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
            .inspect_err(|_| warn!(user_id = %user.id, "Login failed: wrong password"))?;

        info!(user_id = %user.id, "User logged in");

        self.issue_tokens(user).await
    }

    /// Exchange a refresh token for a new pair. The old token is consumed,
    /// so replaying it fails.
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)?;
        let user_id = claims.user_id()?;

        let stored = self
            .ctx
            .token_store()
            .consume(&claims.jti)
            .await?
            .ok_or_else(|| {
                warn!(user_id = %user_id, "Refresh token unknown or already used");
                ServiceError::App(AppError::InvalidToken)
            })?;

        if stored.user_id != user_id {
            warn!(user_id = %user_id, "Refresh token issued to another user");
            return Err(ServiceError::App(AppError::InvalidToken));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidToken))?;

        info!(user_id = %user.id, "Tokens refreshed");

        self.issue_tokens(user).await
    }

    /// Revoke a refresh token. Unknown or expired tokens are ignored.
    #[instrument(skip(self, request))]
    pub async fn logout(&self, request: LogoutRequest) -> ServiceResult<()> {
        let Ok(claims) = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)
        else {
            return Ok(());
        };

        if self.ctx.token_store().revoke(&claims.jti).await? {
            info!(user_id = %claims.sub, "User logged out");
        }
        Ok(())
    }

    /// Get the authenticated user's own profile
    #[instrument(skip(self))]
    pub async fn me(&self, user_id: Snowflake) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(CurrentUserResponse::from(&user))
    }

    async fn issue_tokens(&self, user: User) -> ServiceResult<AuthResponse> {
        let TokenPair {
            access_token,
            refresh_token,
            token_type,
            expires_in,
            refresh_jti,
        } = self.ctx.jwt_service().generate_token_pair(user.id)?;

        self.ctx.token_store().store(&refresh_jti, user.id).await?;

        Ok(AuthResponse {
            access_token,
            refresh_token,
            token_type,
            expires_in,
            user: CurrentUserResponse::from(user),
        })
    }
}
