//! Reaction set <-> array column mapper

use vidshare_core::{ReactionSet, Snowflake};

/// Rebuild a reaction set from the stored arrays
pub fn reaction_set(liked_by: Vec<i64>, disliked_by: Vec<i64>) -> ReactionSet {
    ReactionSet::from_members(
        liked_by.into_iter().map(Snowflake::new),
        disliked_by.into_iter().map(Snowflake::new),
    )
}

/// Column values written for a reaction set.
///
/// Counts are taken from the same sets as the arrays, so a single UPDATE
/// binding all four keeps them in agreement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionColumns {
    pub liked_by: Vec<i64>,
    pub disliked_by: Vec<i64>,
    pub like_count: i64,
    pub dislike_count: i64,
}

impl From<&ReactionSet> for ReactionColumns {
    fn from(set: &ReactionSet) -> Self {
        let liked_by: Vec<i64> = set.liked_by().iter().map(|id| id.into_inner()).collect();
        let disliked_by: Vec<i64> = set.disliked_by().iter().map(|id| id.into_inner()).collect();
        Self {
            like_count: liked_by.len() as i64,
            dislike_count: disliked_by.len() as i64,
            liked_by,
            disliked_by,
        }
    }
}
