//! Reaction subject - the write-side view of a video or comment

use crate::ledger::{HasReactions, ReactionSet};
use crate::value_objects::{Snowflake, SubjectKind};

/// Just enough of a video or comment to run the ledger and write back.
///
/// `version` is the reaction version read at load time; a save succeeds
/// only if the stored version still matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionSubject {
    pub kind: SubjectKind,
    pub id: Snowflake,
    pub reactions: ReactionSet,
    pub version: i64,
}

impl ReactionSubject {
    pub fn new(kind: SubjectKind, id: Snowflake, reactions: ReactionSet, version: i64) -> Self {
        Self {
            kind,
            id,
            reactions,
            version,
        }
    }
}

impl HasReactions for ReactionSubject {
    fn reactions(&self) -> &ReactionSet {
        &self.reactions
    }

    fn reactions_mut(&mut self) -> &mut ReactionSet {
        &mut self.reactions
    }
}
