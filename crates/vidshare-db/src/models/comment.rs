//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for comments table
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub video_id: i64,
    pub parent_id: Option<i64>,
    pub author_id: i64,
    pub text: String,
    pub liked_by: Vec<i64>,
    pub disliked_by: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

/// Result of a reply count aggregate
#[derive(Debug, Clone, FromRow)]
pub struct ReplyCountModel {
    pub parent_id: i64,
    pub count: i64,
}
