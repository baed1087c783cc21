//! Reaction ledger - like/dislike toggling for videos and comments
//!
//! The ledger is a pure function over an in-memory [`ReactionSet`]. Loading
//! the subject, persisting the mutated set, and serializing concurrent
//! writers are the caller's job (see `SubjectRepository`).

mod reaction_set;

pub use reaction_set::ReactionSet;

use crate::value_objects::{ReactionAction, ReactionState, Snowflake};

/// Anything that carries a reaction set: videos, comments, and the slim
/// [`ReactionSubject`](crate::entities::ReactionSubject) used for writes.
pub trait HasReactions {
    fn reactions(&self) -> &ReactionSet;
    fn reactions_mut(&mut self) -> &mut ReactionSet;
}

impl HasReactions for ReactionSet {
    fn reactions(&self) -> &ReactionSet {
        self
    }

    fn reactions_mut(&mut self) -> &mut ReactionSet {
        self
    }
}

/// Counts after an action plus the acting user's resulting position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactionOutcome {
    pub like_count: u64,
    pub dislike_count: u64,
    pub is_liked: bool,
    pub is_disliked: bool,
}

impl ReactionOutcome {
    /// Read a user's view of a subject without changing it
    pub fn observe<S: HasReactions + ?Sized>(subject: &S, user_id: Option<Snowflake>) -> Self {
        let set = subject.reactions();
        let state = user_id.map_or(ReactionState::Neutral, |id| set.state_of(id));
        Self {
            like_count: set.like_count(),
            dislike_count: set.dislike_count(),
            is_liked: state.is_liked(),
            is_disliked: state.is_disliked(),
        }
    }

    pub fn state(&self) -> ReactionState {
        match (self.is_liked, self.is_disliked) {
            (true, _) => ReactionState::Liked,
            (false, true) => ReactionState::Disliked,
            (false, false) => ReactionState::Neutral,
        }
    }
}

pub struct ReactionLedger;

impl ReactionLedger {
    /// Toggle a like. A second like from the same user removes it; a like
    /// from a current disliker switches them over.
    pub fn apply_like<S: HasReactions + ?Sized>(
        subject: &mut S,
        user_id: Snowflake,
    ) -> ReactionOutcome {
        Self::apply(subject, user_id, ReactionAction::Like)
    }

    /// Mirror image of [`apply_like`](Self::apply_like).
    pub fn apply_dislike<S: HasReactions + ?Sized>(
        subject: &mut S,
        user_id: Snowflake,
    ) -> ReactionOutcome {
        Self::apply(subject, user_id, ReactionAction::Dislike)
    }

    pub fn apply<S: HasReactions + ?Sized>(
        subject: &mut S,
        user_id: Snowflake,
        action: ReactionAction,
    ) -> ReactionOutcome {
        let set = subject.reactions_mut();
        let next = set.state_of(user_id).next(action);

        set.liked_by.remove(&user_id);
        set.disliked_by.remove(&user_id);
        match next {
            ReactionState::Liked => {
                set.liked_by.insert(user_id);
            }
            ReactionState::Disliked => {
                set.disliked_by.insert(user_id);
            }
            ReactionState::Neutral => {}
        }

        ReactionOutcome::observe(&*subject, Some(user_id))
    }
}
