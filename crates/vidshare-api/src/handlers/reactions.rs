//! Like/dislike handlers
//!
//! Each route toggles the caller's reaction and answers with the
//! subject's counts plus the caller's resulting state.

use axum::{extract::State, Json};
use vidshare_core::{ReactionAction, SubjectKind};
use vidshare_service::{CommentService, ReactionService, SubjectReactionResponse};

use crate::extractors::{AuthUser, CommentPath, IdPath, SubjectPath};
use crate::response::ApiResult;
use crate::state::AppState;

async fn react_to_subject(
    state: &AppState,
    auth: AuthUser,
    path: SubjectPath,
    action: ReactionAction,
) -> ApiResult<Json<SubjectReactionResponse>> {
    let response = ReactionService::new(state.service_context())
        .react(path.kind, path.id, auth.user_id, action)
        .await?;
    Ok(Json(response))
}

/// POST /subjects/{kind}/{id}/like
pub async fn like_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    path: SubjectPath,
) -> ApiResult<Json<SubjectReactionResponse>> {
    react_to_subject(&state, auth, path, ReactionAction::Like).await
}

/// POST /subjects/{kind}/{id}/dislike
pub async fn dislike_subject(
    State(state): State<AppState>,
    auth: AuthUser,
    path: SubjectPath,
) -> ApiResult<Json<SubjectReactionResponse>> {
    react_to_subject(&state, auth, path, ReactionAction::Dislike).await
}

/// POST /videos/{id}/like
pub async fn like_video(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<SubjectReactionResponse>> {
    let path = SubjectPath {
        kind: SubjectKind::Video,
        id,
    };
    react_to_subject(&state, auth, path, ReactionAction::Like).await
}

/// POST /videos/{id}/dislike
pub async fn dislike_video(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(id): IdPath,
) -> ApiResult<Json<SubjectReactionResponse>> {
    let path = SubjectPath {
        kind: SubjectKind::Video,
        id,
    };
    react_to_subject(&state, auth, path, ReactionAction::Dislike).await
}

/// POST /comments/{video_id}/{comment_id}/like
pub async fn like_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    path: CommentPath,
) -> ApiResult<Json<SubjectReactionResponse>> {
    let response = CommentService::new(state.service_context())
        .react(path.video_id, path.comment_id, auth.user_id, ReactionAction::Like)
        .await?;
    Ok(Json(response))
}

/// POST /comments/{video_id}/{comment_id}/dislike
pub async fn dislike_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    path: CommentPath,
) -> ApiResult<Json<SubjectReactionResponse>> {
    let response = CommentService::new(state.service_context())
        .react(
            path.video_id,
            path.comment_id,
            auth.user_id,
            ReactionAction::Dislike,
        )
        .await?;
    Ok(Json(response))
}
