//! Test fixtures and data generators
//!
//! Request bodies the tests send and the slices of responses they read.
//! Names include a random suffix because the database outlives a test run.

use serde::{Deserialize, Serialize};

/// Short random suffix for unique usernames and emails
pub fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            username: format!("user_{suffix}"),
            email: format!("user_{suffix}@example.com"),
            password: "TestPass123".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl CreateVideoRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test video {suffix}"),
            description: Some("Integration test upload".to_string()),
            video_url: format!("https://cdn.example.com/videos/{suffix}.mp4"),
            category: Some("Education".to_string()),
            tags: Some(vec!["test".to_string()]),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    pub id: String,
    pub title: String,
    pub category: String,
    pub views: i64,
    pub like_count: u64,
    pub dislike_count: u64,
    pub is_liked: bool,
    pub is_disliked: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub text: String,
    pub parent_id: Option<String>,
}

impl CreateCommentRequest {
    pub fn top_level(text: &str) -> Self {
        Self {
            text: text.to_string(),
            parent_id: None,
        }
    }

    pub fn reply(text: &str, parent_id: &str) -> Self {
        Self {
            text: text.to_string(),
            parent_id: Some(parent_id.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub video_id: String,
    pub parent_id: Option<String>,
    pub text: String,
    pub reply_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub id: String,
    pub like_count: u64,
    pub dislike_count: u64,
    pub is_liked: bool,
    pub is_disliked: bool,
}
