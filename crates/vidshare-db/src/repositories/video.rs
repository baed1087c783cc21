//! PostgreSQL implementation of VideoRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use vidshare_core::{DomainError, RepoResult, Snowflake, Video, VideoQuery, VideoRepository};

use crate::mappers::ReactionColumns;
use crate::models::VideoModel;

use super::error::{like_pattern, map_db_error, map_foreign_key_violation};

const VIDEO_COLUMNS: &str = "id, uploader_id, title, description, thumbnail_url, video_url, \
     category, tags, views, liked_by, disliked_by, uploaded_at, updated_at";

/// PostgreSQL implementation of VideoRepository
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");
        let result = sqlx::query_as::<_, VideoModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Video::from))
    }

    #[instrument(skip(self))]
    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        let exists: bool = sqlx::query_scalar(r"SELECT EXISTS(SELECT 1 FROM videos WHERE id = $1)")
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn list(&self, query: VideoQuery) -> RepoResult<Vec<Video>> {
        let sql = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos \
             WHERE ($1::TEXT IS NULL OR category = $1) \
             ORDER BY uploaded_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        let results = sqlx::query_as::<_, VideoModel>(&sql)
            .bind(query.category)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Video::from).collect())
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<Video>> {
        let sql = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos \
             WHERE title ILIKE $1 \
                OR description ILIKE $1 \
                OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE $1) \
             ORDER BY uploaded_at DESC, id DESC \
             LIMIT $2"
        );
        let results = sqlx::query_as::<_, VideoModel>(&sql)
            .bind(like_pattern(term))
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Video::from).collect())
    }

    #[instrument(skip(self, video), fields(video_id = %video.id))]
    async fn create(&self, video: &Video) -> RepoResult<()> {
        let reactions = ReactionColumns::from(&video.reactions);
        sqlx::query(
            r"
            INSERT INTO videos (id, uploader_id, title, description, thumbnail_url, video_url,
                                category, tags, views, liked_by, disliked_by, like_count,
                                dislike_count, uploaded_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            ",
        )
        .bind(video.id.into_inner())
        .bind(video.uploader_id.into_inner())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.video_url)
        .bind(&video.category)
        .bind(&video.tags)
        .bind(video.views)
        .bind(reactions.liked_by)
        .bind(reactions.disliked_by)
        .bind(reactions.like_count)
        .bind(reactions.dislike_count)
        .bind(video.uploaded_at)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_foreign_key_violation(e, || DomainError::UserNotFound(video.uploader_id)))?;

        Ok(())
    }

    #[instrument(skip(self, video), fields(video_id = %video.id))]
    async fn update_metadata(&self, video: &Video) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE videos
            SET title = $2, description = $3, thumbnail_url = $4, category = $5, tags = $6,
                updated_at = $7
            WHERE id = $1
            ",
        )
        .bind(video.id.into_inner())
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail_url)
        .bind(&video.category)
        .bind(&video.tags)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::VideoNotFound(video.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_views(&self, id: Snowflake) -> RepoResult<Option<i64>> {
        let views: Option<i64> =
            sqlx::query_scalar(r"UPDATE videos SET views = views + 1 WHERE id = $1 RETURNING views")
                .bind(id.into_inner())
                .fetch_optional(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(views)
    }

    /// Comments go with the video through `ON DELETE CASCADE`
    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(r"DELETE FROM videos WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::VideoNotFound(id));
        }
        debug!("Video and its comments deleted");

        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RepoResult<i64> {
        let count: i64 = sqlx::query_scalar(r"SELECT COUNT(*) FROM videos")
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(count)
    }
}
