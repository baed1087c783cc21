//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;
use vidshare_core::{Snowflake, UserPatch, VideoPatch};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Strength rules are checked separately by the auth service
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: String,
}

// ============================================================================
// User Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 32, message = "Username must be 3-32 characters"))]
    pub username: Option<String>,

    #[validate(url(message = "Avatar must be a URL"))]
    pub avatar: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            username: request.username.map(|u| u.trim().to_string()),
            avatar: request.avatar,
        }
    }
}

// ============================================================================
// Video Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: String,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    #[serde(default)]
    pub description: Option<String>,

    #[validate(url(message = "Thumbnail must be a URL"))]
    #[serde(default)]
    pub thumbnail_url: Option<String>,

    #[validate(url(message = "Video URL must be a URL"))]
    pub video_url: String,

    #[validate(length(max = 50, message = "Category must be at most 50 characters"))]
    #[serde(default)]
    pub category: Option<String>,

    #[validate(length(max = 20, message = "At most 20 tags"))]
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Partial metadata edit; omitted fields keep their stored values
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be 1-100 characters"))]
    pub title: Option<String>,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(url(message = "Thumbnail must be a URL"))]
    pub thumbnail_url: Option<String>,

    #[validate(length(max = 50, message = "Category must be at most 50 characters"))]
    pub category: Option<String>,

    #[validate(length(max = 20, message = "At most 20 tags"))]
    pub tags: Option<Vec<String>>,
}

impl From<UpdateVideoRequest> for VideoPatch {
    fn from(request: UpdateVideoRequest) -> Self {
        Self {
            title: request.title.map(|t| t.trim().to_string()),
            description: request.description,
            thumbnail_url: request.thumbnail_url,
            category: request.category,
            tags: request.tags,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListVideosQuery {
    pub category: Option<String>,

    #[validate(range(min = 1, message = "Page starts at 1"))]
    pub page: Option<u32>,

    #[validate(range(min = 1, max = 100, message = "Limit must be 1-100"))]
    pub limit: Option<u32>,
}

impl ListVideosQuery {
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.limit())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SearchQuery {
    pub q: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Text bounds are enforced by the domain after trimming
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub text: String,

    #[serde(default)]
    pub parent_id: Option<Snowflake>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    pub text: String,
}
