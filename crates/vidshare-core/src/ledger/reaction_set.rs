//! Membership sets behind a subject's like and dislike counts

use std::collections::BTreeSet;

use crate::value_objects::{ReactionState, Snowflake};

/// Who liked and who disliked one subject.
///
/// Counts are the set sizes; there is no separately stored counter that
/// could drift. A user is never a member of both sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReactionSet {
    pub(super) liked_by: BTreeSet<Snowflake>,
    pub(super) disliked_by: BTreeSet<Snowflake>,
}

impl ReactionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a set from stored membership lists.
    ///
    /// Duplicates collapse. A user present in both lists is kept as a liker
    /// only, so the result is always disjoint.
    pub fn from_members<L, D>(liked_by: L, disliked_by: D) -> Self
    where
        L: IntoIterator<Item = Snowflake>,
        D: IntoIterator<Item = Snowflake>,
    {
        let liked_by: BTreeSet<_> = liked_by.into_iter().collect();
        let disliked_by = disliked_by
            .into_iter()
            .filter(|id| !liked_by.contains(id))
            .collect();
        Self {
            liked_by,
            disliked_by,
        }
    }

    #[inline]
    pub fn like_count(&self) -> u64 {
        self.liked_by.len() as u64
    }

    #[inline]
    pub fn dislike_count(&self) -> u64 {
        self.disliked_by.len() as u64
    }

    pub fn liked_by(&self) -> &BTreeSet<Snowflake> {
        &self.liked_by
    }

    pub fn disliked_by(&self) -> &BTreeSet<Snowflake> {
        &self.disliked_by
    }

    pub fn state_of(&self, user_id: Snowflake) -> ReactionState {
        if self.liked_by.contains(&user_id) {
            ReactionState::Liked
        } else if self.disliked_by.contains(&user_id) {
            ReactionState::Disliked
        } else {
            ReactionState::Neutral
        }
    }
}
