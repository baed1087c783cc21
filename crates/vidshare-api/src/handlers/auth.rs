//! Authentication handlers

use axum::{extract::State, Json};
use vidshare_service::{
    AuthResponse, AuthService, CurrentUserResponse, LoginRequest, LogoutRequest,
    RefreshTokenRequest, RegisterRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<AuthResponse>> {
    let response = AuthService::new(state.service_context())
        .register(request)
        .await?;
    Ok(Created(response))
}

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = AuthService::new(state.service_context())
        .login(request)
        .await?;
    Ok(Json(response))
}

/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = AuthService::new(state.service_context())
        .refresh(request)
        .await?;
    Ok(Json(response))
}

/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LogoutRequest>,
) -> ApiResult<NoContent> {
    AuthService::new(state.service_context())
        .logout(request)
        .await?;
    Ok(NoContent)
}

/// GET /auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let user = AuthService::new(state.service_context())
        .me(auth.user_id)
        .await?;
    Ok(Json(user))
}
