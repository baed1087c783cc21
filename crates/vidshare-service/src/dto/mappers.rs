//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use vidshare_core::{Comment, ReactionOutcome, Snowflake, User, Video};

use super::responses::{
    AuthorResponse, ChannelResponse, CommentResponse, CurrentUserResponse, PublicUserResponse,
    ReactionResponse, SubjectReactionResponse, VideoDetailResponse, VideoSummaryResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            subscribers: user.subscribers,
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
            subscribers: user.subscribers,
            created_at: user.created_at,
        }
    }
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for ChannelResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.username.clone(),
            avatar: user.avatar.clone(),
            subscribers: user.subscribers,
        }
    }
}

impl From<&User> for AuthorResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

// ============================================================================
// Video Mappers
// ============================================================================

/// Video joined with its uploader, if the uploader still exists
#[derive(Debug, Clone)]
pub struct VideoWithChannel {
    pub video: Video,
    pub channel: Option<User>,
}

impl From<VideoWithChannel> for VideoSummaryResponse {
    fn from(data: VideoWithChannel) -> Self {
        let VideoWithChannel { video, channel } = data;
        Self {
            id: video.id.to_string(),
            like_count: video.reactions.like_count(),
            dislike_count: video.reactions.dislike_count(),
            title: video.title,
            description: video.description,
            thumbnail_url: video.thumbnail_url,
            category: video.category,
            views: video.views,
            uploaded_at: video.uploaded_at,
            channel: channel.as_ref().map(ChannelResponse::from),
        }
    }
}

/// Video page as seen by one (possibly anonymous) viewer
#[derive(Debug, Clone)]
pub struct VideoView {
    pub video: Video,
    pub channel: Option<User>,
    pub viewer: Option<Snowflake>,
}

impl From<VideoView> for VideoDetailResponse {
    fn from(data: VideoView) -> Self {
        let VideoView {
            video,
            channel,
            viewer,
        } = data;
        let outcome = ReactionOutcome::observe(&video, viewer);
        Self {
            id: video.id.to_string(),
            title: video.title,
            description: video.description,
            thumbnail_url: video.thumbnail_url,
            video_url: video.video_url,
            category: video.category,
            tags: video.tags,
            views: video.views,
            like_count: outcome.like_count,
            dislike_count: outcome.dislike_count,
            is_liked: outcome.is_liked,
            is_disliked: outcome.is_disliked,
            uploaded_at: video.uploaded_at,
            updated_at: video.updated_at,
            channel: channel.as_ref().map(ChannelResponse::from),
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

/// Comment with its author and, for top-level comments, the reply count
#[derive(Debug, Clone)]
pub struct CommentWithDetails {
    pub comment: Comment,
    pub author: Option<User>,
    pub reply_count: Option<i64>,
}

impl From<CommentWithDetails> for CommentResponse {
    fn from(data: CommentWithDetails) -> Self {
        let CommentWithDetails {
            comment,
            author,
            reply_count,
        } = data;
        Self {
            id: comment.id.to_string(),
            video_id: comment.video_id.to_string(),
            parent_id: comment.parent_id.map(|id| id.to_string()),
            like_count: comment.reactions.like_count(),
            dislike_count: comment.reactions.dislike_count(),
            text: comment.text,
            author: author.as_ref().map(AuthorResponse::from),
            reply_count,
            created_at: comment.created_at,
            edited_at: comment.edited_at,
        }
    }
}

// ============================================================================
// Reaction Mappers
// ============================================================================

impl From<ReactionOutcome> for ReactionResponse {
    fn from(outcome: ReactionOutcome) -> Self {
        Self {
            like_count: outcome.like_count,
            dislike_count: outcome.dislike_count,
            is_liked: outcome.is_liked,
            is_disliked: outcome.is_disliked,
        }
    }
}

impl SubjectReactionResponse {
    pub fn new(id: Snowflake, outcome: ReactionOutcome) -> Self {
        Self {
            id: id.to_string(),
            reaction: outcome.into(),
        }
    }
}
