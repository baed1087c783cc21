//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use vidshare_core::{Comment, CommentRepository, DomainError, RepoResult, Snowflake};

use crate::mappers::ReactionColumns;
use crate::models::{CommentModel, ReplyCountModel};

use super::error::{map_db_error, map_foreign_key_violation};

const COMMENT_COLUMNS: &str = "id, video_id, parent_id, author_id, text, liked_by, disliked_by, \
     created_at, edited_at";

/// PostgreSQL implementation of CommentRepository
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        let sql = format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1");
        let result = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Comment::from))
    }

    #[instrument(skip(self))]
    async fn find_top_level(&self, video_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments \
             WHERE video_id = $1 AND parent_id IS NULL \
             ORDER BY created_at DESC, id DESC"
        );
        let results = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(video_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_replies(&self, parent_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let sql = format!(
            "SELECT {COMMENT_COLUMNS} FROM comments \
             WHERE parent_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        let results = sqlx::query_as::<_, CommentModel>(&sql)
            .bind(parent_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Comment::from).collect())
    }

    #[instrument(skip(self, parent_ids), fields(count = parent_ids.len()))]
    async fn reply_counts(&self, parent_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw: Vec<i64> = parent_ids.iter().map(|id| id.into_inner()).collect();
        let results = sqlx::query_as::<_, ReplyCountModel>(
            r"
            SELECT parent_id, COUNT(*) AS count
            FROM comments
            WHERE parent_id = ANY($1)
            GROUP BY parent_id
            ",
        )
        .bind(raw)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results
            .into_iter()
            .map(|r| (Snowflake::new(r.parent_id), r.count))
            .collect())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        let reactions = ReactionColumns::from(&comment.reactions);
        sqlx::query(
            r"
            INSERT INTO comments (id, video_id, parent_id, author_id, text, liked_by,
                                  disliked_by, like_count, dislike_count, created_at, edited_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ",
        )
        .bind(comment.id.into_inner())
        .bind(comment.video_id.into_inner())
        .bind(comment.parent_id.map(Snowflake::into_inner))
        .bind(comment.author_id.into_inner())
        .bind(&comment.text)
        .bind(reactions.liked_by)
        .bind(reactions.disliked_by)
        .bind(reactions.like_count)
        .bind(reactions.dislike_count)
        .bind(comment.created_at)
        .bind(comment.edited_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || match comment.parent_id {
                Some(parent_id) => DomainError::ParentCommentNotFound(parent_id),
                None => DomainError::VideoNotFound(comment.video_id),
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, comment), fields(comment_id = %comment.id))]
    async fn update_text(&self, comment: &Comment) -> RepoResult<()> {
        let result = sqlx::query(r"UPDATE comments SET text = $2, edited_at = $3 WHERE id = $1")
            .bind(comment.id.into_inner())
            .bind(&comment.text)
            .bind(comment.edited_at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::CommentNotFound(comment.id));
        }

        Ok(())
    }

    /// Removes the comment and every comment answering it, directly or
    /// through other replies. The row is locked first so a reply cannot be
    /// attached while the thread is being collected.
    #[instrument(skip(self))]
    async fn delete_with_replies(&self, id: Snowflake) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let locked: Option<i64> =
            sqlx::query_scalar(r"SELECT id FROM comments WHERE id = $1 FOR UPDATE")
                .bind(id.into_inner())
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?;
        if locked.is_none() {
            return Err(DomainError::CommentNotFound(id));
        }

        let deleted = sqlx::query(
            r"
            WITH RECURSIVE thread AS (
                SELECT id FROM comments WHERE id = $1
                UNION ALL
                SELECT c.id FROM comments c JOIN thread t ON c.parent_id = t.id
            )
            DELETE FROM comments WHERE id IN (SELECT id FROM thread)
            ",
        )
        .bind(id.into_inner())
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?
        .rows_affected();

        tx.commit().await.map_err(map_db_error)?;
        debug!(replies = deleted.saturating_sub(1), "Comment deleted with its replies");

        Ok(deleted)
    }
}
