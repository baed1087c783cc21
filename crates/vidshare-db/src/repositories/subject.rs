//! PostgreSQL implementation of SubjectRepository
//!
//! Videos and comments carry the same reaction columns, so one repository
//! serves both by choosing the table from the subject kind. Writes are
//! guarded by `reaction_version`: an UPDATE that matches no row either lost
//! a race or targeted a missing subject, and a follow-up existence check
//! tells the two apart.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use vidshare_core::{
    DomainError, ReactionSubject, RepoResult, Snowflake, SubjectKind, SubjectRepository,
};

use crate::mappers::{reaction_subject, ReactionColumns};
use crate::models::ReactionRowModel;

use super::error::map_db_error;

const fn table_for(kind: SubjectKind) -> &'static str {
    match kind {
        SubjectKind::Video => "videos",
        SubjectKind::Comment => "comments",
    }
}

/// PostgreSQL implementation of SubjectRepository
#[derive(Clone)]
pub struct PgSubjectRepository {
    pool: PgPool,
}

impl PgSubjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, kind: SubjectKind, id: Snowflake) -> RepoResult<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
            table_for(kind)
        );
        sqlx::query_scalar(&sql)
            .bind(id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[async_trait]
impl SubjectRepository for PgSubjectRepository {
    #[instrument(skip(self))]
    async fn load(&self, kind: SubjectKind, id: Snowflake) -> RepoResult<Option<ReactionSubject>> {
        let sql = format!(
            "SELECT id, liked_by, disliked_by, reaction_version FROM {} WHERE id = $1",
            table_for(kind)
        );
        let row = sqlx::query_as::<_, ReactionRowModel>(&sql)
            .bind(id.into_inner())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(row.map(|row| reaction_subject(kind, row)))
    }

    #[instrument(skip(self, subject), fields(kind = %subject.kind, id = %subject.id, version = subject.version))]
    async fn save(&self, subject: &ReactionSubject) -> RepoResult<()> {
        let columns = ReactionColumns::from(&subject.reactions);
        let sql = format!(
            "UPDATE {} \
             SET liked_by = $2, disliked_by = $3, like_count = $4, dislike_count = $5, \
                 reaction_version = reaction_version + 1 \
             WHERE id = $1 AND reaction_version = $6",
            table_for(subject.kind)
        );
        let result = sqlx::query(&sql)
            .bind(subject.id.into_inner())
            .bind(columns.liked_by)
            .bind(columns.disliked_by)
            .bind(columns.like_count)
            .bind(columns.dislike_count)
            .bind(subject.version)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            if self.exists(subject.kind, subject.id).await? {
                debug!("Stale reaction version");
                return Err(DomainError::ConcurrentModification {
                    kind: subject.kind,
                    id: subject.id,
                });
            }
            return Err(DomainError::SubjectNotFound {
                kind: subject.kind,
                id: subject.id,
            });
        }

        Ok(())
    }
}
