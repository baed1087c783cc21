//! User service
//!
//! Channel profiles and self-service profile edits.

use tracing::{info, instrument};
use validator::Validate;
use vidshare_core::{DomainError, Snowflake, UserPatch};

use crate::dto::{CurrentUserResponse, PublicUserResponse, UpdateUserRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public channel profile
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: Snowflake) -> ServiceResult<PublicUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(PublicUserResponse::from(user))
    }

    /// Apply a partial profile edit for the authenticated user
    #[instrument(skip(self, request))]
    pub async fn update_me(
        &self,
        user_id: Snowflake,
        request: UpdateUserRequest,
    ) -> ServiceResult<CurrentUserResponse> {
        request.validate()?;

        let mut user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        let patch = UserPatch::from(request);
        if patch.is_empty() {
            return Ok(CurrentUserResponse::from(user));
        }

        if let Some(username) = &patch.username {
            if !username.eq_ignore_ascii_case(&user.username)
                && self.ctx.user_repo().username_exists(username).await?
            {
                return Err(DomainError::UsernameAlreadyExists.into());
            }
        }

        user.merge(patch);
        self.ctx.user_repo().update(&user).await?;

        info!(user_id = %user.id, "Profile updated");

        Ok(CurrentUserResponse::from(user))
    }
}
