//! Reaction columns shared by every reactable table

use sqlx::FromRow;

/// The reaction slice of a `videos` or `comments` row
#[derive(Debug, Clone, FromRow)]
pub struct ReactionRowModel {
    pub id: i64,
    pub liked_by: Vec<i64>,
    pub disliked_by: Vec<i64>,
    pub reaction_version: i64,
}
