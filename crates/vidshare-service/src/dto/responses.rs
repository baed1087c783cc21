//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` with camelCase field names.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Auth Responses
// ============================================================================

/// Tokens plus the account they were issued for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: CurrentUserResponse,
}

// ============================================================================
// User Responses
// ============================================================================

/// The authenticated user's own profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub avatar: String,
    pub subscribers: i64,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Someone else's channel profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserResponse {
    pub id: String,
    pub username: String,
    pub avatar: String,
    pub subscribers: i64,
    pub created_at: DateTime<Utc>,
}

/// Uploader shown alongside a video
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResponse {
    pub id: String,
    pub name: String,
    pub avatar: String,
    pub subscribers: i64,
}

/// Author shown alongside a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: String,
    pub username: String,
    pub avatar: String,
}

// ============================================================================
// Video Responses
// ============================================================================

/// Feed and search entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummaryResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub category: String,
    pub views: i64,
    pub like_count: u64,
    pub dislike_count: u64,
    pub uploaded_at: DateTime<Utc>,
    pub channel: Option<ChannelResponse>,
}

/// Full video page, including the viewer's own reaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetailResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub views: i64,
    pub like_count: u64,
    pub dislike_count: u64,
    pub is_liked: bool,
    pub is_disliked: bool,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub channel: Option<ChannelResponse>,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub video_id: String,
    pub parent_id: Option<String>,
    pub text: String,
    pub author: Option<AuthorResponse>,
    pub like_count: u64,
    pub dislike_count: u64,
    /// Only present on top-level comments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_count: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

/// Result of a delete that may remove more than one row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub deleted: u64,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// State of a subject after a like or dislike
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub like_count: u64,
    pub dislike_count: u64,
    pub is_liked: bool,
    pub is_disliked: bool,
}

/// Reaction state tagged with the subject it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectReactionResponse {
    pub id: String,
    #[serde(flatten)]
    pub reaction: ReactionResponse,
}

// ============================================================================
// Health Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    pub redis: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool, redis_healthy: bool) -> Self {
        let label = |healthy: bool| if healthy { "healthy" } else { "unhealthy" }.to_string();
        Self {
            status: if database_healthy && redis_healthy {
                "ready"
            } else {
                "not_ready"
            }
            .to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: label(database_healthy),
                redis: label(redis_healthy),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
