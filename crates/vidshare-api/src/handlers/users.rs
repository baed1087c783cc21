//! User handlers

use axum::{extract::State, Json};
use vidshare_service::{CurrentUserResponse, PublicUserResponse, UpdateUserRequest, UserService};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<PublicUserResponse>> {
    let user = UserService::new(state.service_context())
        .get_user(user_id)
        .await?;
    Ok(Json(user))
}

/// PATCH /users/me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let user = UserService::new(state.service_context())
        .update_me(auth.user_id, request)
        .await?;
    Ok(Json(user))
}
