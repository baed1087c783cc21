//! Comment handlers

use axum::{extract::State, Json};
use vidshare_service::{
    CommentResponse, CommentService, CreateCommentRequest, DeleteResponse, UpdateCommentRequest,
};

use crate::extractors::{AuthUser, CommentPath, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /comments/{video_id}
pub async fn list_comments(
    State(state): State<AppState>,
    IdPath(video_id): IdPath,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = CommentService::new(state.service_context())
        .list_top_level(video_id)
        .await?;
    Ok(Json(comments))
}

/// GET /comments/{video_id}/{comment_id}/replies
pub async fn list_replies(
    State(state): State<AppState>,
    path: CommentPath,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let replies = CommentService::new(state.service_context())
        .list_replies(path.video_id, path.comment_id)
        .await?;
    Ok(Json(replies))
}

/// POST /comments/{video_id}
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(video_id): IdPath,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<CommentResponse>> {
    let comment = CommentService::new(state.service_context())
        .create(video_id, auth.user_id, request)
        .await?;
    Ok(Created(comment))
}

/// PUT /comments/{video_id}/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    path: CommentPath,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let comment = CommentService::new(state.service_context())
        .update(path.video_id, path.comment_id, auth.user_id, request)
        .await?;
    Ok(Json(comment))
}

/// DELETE /comments/{video_id}/{comment_id}
///
/// Direct replies are deleted along with the comment.
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    path: CommentPath,
) -> ApiResult<Json<DeleteResponse>> {
    let response = CommentService::new(state.service_context())
        .delete(path.video_id, path.comment_id, auth.user_id)
        .await?;
    Ok(Json(response))
}
