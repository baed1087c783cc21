//! Video service
//!
//! Feed, search, detail views, and uploader-only metadata edits.

use std::collections::HashMap;

use tracing::{info, instrument};
use validator::Validate;
use vidshare_core::{
    normalize_category, normalize_tags, DomainError, Snowflake, User, Video, VideoPatch,
    VideoQuery,
};

use crate::dto::{
    CreateVideoRequest, DeleteResponse, ListVideosQuery, SearchQuery, UpdateVideoRequest,
    VideoDetailResponse, VideoSummaryResponse, VideoView, VideoWithChannel,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Maximum number of search hits returned
pub const SEARCH_LIMIT: i64 = 20;

/// Video service
pub struct VideoService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VideoService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Newest uploads first, optionally filtered by category
    #[instrument(skip(self))]
    pub async fn list(&self, query: ListVideosQuery) -> ServiceResult<Vec<VideoSummaryResponse>> {
        query.validate()?;

        let videos = self
            .ctx
            .video_repo()
            .list(VideoQuery {
                category: query
                    .category
                    .as_deref()
                    .map(normalize_category)
                    .filter(|c| !c.is_empty()),
                limit: i64::from(query.limit()),
                offset: query.offset(),
            })
            .await?;

        self.with_channels(videos).await
    }

    /// Case-insensitive match on title, description, or tags
    #[instrument(skip(self))]
    pub async fn search(&self, query: SearchQuery) -> ServiceResult<Vec<VideoSummaryResponse>> {
        let term = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ServiceError::validation("Search query is required"))?;

        let videos = self.ctx.video_repo().search(term, SEARCH_LIMIT).await?;
        self.with_channels(videos).await
    }

    /// Count a view and return the page as the viewer sees it
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        video_id: Snowflake,
        viewer: Option<Snowflake>,
    ) -> ServiceResult<VideoDetailResponse> {
        self.ctx
            .video_repo()
            .increment_views(video_id)
            .await?
            .ok_or(DomainError::VideoNotFound(video_id))?;

        let video = self.find(video_id).await?;
        let channel = self.ctx.user_repo().find_by_id(video.uploader_id).await?;

        Ok(VideoDetailResponse::from(VideoView {
            video,
            channel,
            viewer,
        }))
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(
        &self,
        uploader_id: Snowflake,
        request: CreateVideoRequest,
    ) -> ServiceResult<VideoDetailResponse> {
        request.validate()?;

        let title = request.title.trim();
        if title.is_empty() {
            return Err(ServiceError::validation("Title is required"));
        }

        let uploader = self
            .ctx
            .user_repo()
            .find_by_id(uploader_id)
            .await?
            .ok_or(DomainError::UserNotFound(uploader_id))?;

        let mut video = Video::new(
            self.ctx.generate_id(),
            uploader.id,
            title.to_string(),
            request.video_url,
        );
        video.description = request.description.unwrap_or_default();
        video.thumbnail_url = request.thumbnail_url.unwrap_or_default();
        video.category = request
            .category
            .as_deref()
            .map(normalize_category)
            .unwrap_or_default();
        video.tags = normalize_tags(request.tags.unwrap_or_default());

        self.ctx.video_repo().create(&video).await?;

        info!(video_id = %video.id, uploader_id = %uploader.id, "Video created");

        Ok(VideoDetailResponse::from(VideoView {
            video,
            channel: Some(uploader),
            viewer: Some(uploader_id),
        }))
    }

    /// Uploader-only partial edit; omitted fields keep their values
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        video_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateVideoRequest,
    ) -> ServiceResult<VideoDetailResponse> {
        request.validate()?;

        let mut video = self.find(video_id).await?;
        if !video.is_uploaded_by(actor_id) {
            return Err(DomainError::NotVideoUploader.into());
        }

        let patch = VideoPatch::from(request);
        if patch.title.as_deref().is_some_and(str::is_empty) {
            return Err(ServiceError::validation("Title is required"));
        }

        if video.merge(patch) {
            self.ctx.video_repo().update_metadata(&video).await?;
            info!(video_id = %video.id, "Video updated");
        }

        let channel = self.ctx.user_repo().find_by_id(video.uploader_id).await?;
        Ok(VideoDetailResponse::from(VideoView {
            video,
            channel,
            viewer: Some(actor_id),
        }))
    }

    /// Uploader or admin; comments go with the video
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        video_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<DeleteResponse> {
        let video = self.find(video_id).await?;

        if !video.is_uploaded_by(actor_id) && !self.is_admin(actor_id).await? {
            return Err(DomainError::NotVideoUploader.into());
        }

        self.ctx.video_repo().delete(video.id).await?;

        info!(video_id = %video.id, actor_id = %actor_id, "Video deleted");

        Ok(DeleteResponse {
            message: "Video deleted".to_string(),
            deleted: 1,
        })
    }

    async fn find(&self, video_id: Snowflake) -> ServiceResult<Video> {
        Ok(self
            .ctx
            .video_repo()
            .find_by_id(video_id)
            .await?
            .ok_or(DomainError::VideoNotFound(video_id))?)
    }

    async fn is_admin(&self, user_id: Snowflake) -> ServiceResult<bool> {
        Ok(self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .is_some_and(|u| u.is_admin))
    }

    async fn with_channels(&self, videos: Vec<Video>) -> ServiceResult<Vec<VideoSummaryResponse>> {
        let mut uploader_ids: Vec<Snowflake> = videos.iter().map(|v| v.uploader_id).collect();
        uploader_ids.sort_unstable();
        uploader_ids.dedup();

        let channels: HashMap<Snowflake, User> = self
            .ctx
            .user_repo()
            .find_by_ids(&uploader_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(videos
            .into_iter()
            .map(|video| {
                let channel = channels.get(&video.uploader_id).cloned();
                VideoSummaryResponse::from(VideoWithChannel { video, channel })
            })
            .collect())
    }
}
