//! Video entity <-> model mapper

use vidshare_core::{Snowflake, Video};

use super::reaction::reaction_set;
use crate::models::VideoModel;

impl From<VideoModel> for Video {
    fn from(model: VideoModel) -> Self {
        Video {
            id: Snowflake::new(model.id),
            uploader_id: Snowflake::new(model.uploader_id),
            title: model.title,
            description: model.description,
            thumbnail_url: model.thumbnail_url,
            video_url: model.video_url,
            category: model.category,
            tags: model.tags,
            views: model.views,
            reactions: reaction_set(model.liked_by, model.disliked_by),
            uploaded_at: model.uploaded_at,
            updated_at: model.updated_at,
        }
    }
}
