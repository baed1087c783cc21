//! Video database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for videos table
#[derive(Debug, Clone, FromRow)]
pub struct VideoModel {
    pub id: i64,
    pub uploader_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
    pub video_url: String,
    pub category: String,
    pub tags: Vec<String>,
    pub views: i64,
    pub liked_by: Vec<i64>,
    pub disliked_by: Vec<i64>,
    pub uploaded_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
