//! Video handlers

use axum::{extract::State, Json};
use vidshare_service::{
    CreateVideoRequest, DeleteResponse, ListVideosQuery, SearchQuery, UpdateVideoRequest,
    VideoDetailResponse, VideoService, VideoSummaryResponse,
};

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /videos?category&page&limit
pub async fn list_videos(
    State(state): State<AppState>,
    _viewer: OptionalAuthUser,
    ValidatedQuery(query): ValidatedQuery<ListVideosQuery>,
) -> ApiResult<Json<Vec<VideoSummaryResponse>>> {
    let videos = VideoService::new(state.service_context())
        .list(query)
        .await?;
    Ok(Json(videos))
}

/// GET /videos/search?q
pub async fn search_videos(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SearchQuery>,
) -> ApiResult<Json<Vec<VideoSummaryResponse>>> {
    let videos = VideoService::new(state.service_context())
        .search(query)
        .await?;
    Ok(Json(videos))
}

/// GET /videos/{id}
pub async fn get_video(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    IdPath(video_id): IdPath,
) -> ApiResult<Json<VideoDetailResponse>> {
    let video = VideoService::new(state.service_context())
        .get(video_id, viewer.user_id())
        .await?;
    Ok(Json(video))
}

/// POST /videos
pub async fn create_video(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateVideoRequest>,
) -> ApiResult<Created<VideoDetailResponse>> {
    let video = VideoService::new(state.service_context())
        .create(auth.user_id, request)
        .await?;
    Ok(Created(video))
}

/// PATCH /videos/{id}
pub async fn update_video(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(video_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateVideoRequest>,
) -> ApiResult<Json<VideoDetailResponse>> {
    let video = VideoService::new(state.service_context())
        .update(video_id, auth.user_id, request)
        .await?;
    Ok(Json(video))
}

/// DELETE /videos/{id}
pub async fn delete_video(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(video_id): IdPath,
) -> ApiResult<Json<DeleteResponse>> {
    let response = VideoService::new(state.service_context())
        .delete(video_id, auth.user_id)
        .await?;
    Ok(Json(response))
}
