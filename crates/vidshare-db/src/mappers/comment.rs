//! Comment entity <-> model mapper

use vidshare_core::{Comment, ReactionSubject, Snowflake, SubjectKind};

use super::reaction::reaction_set;
use crate::models::{CommentModel, ReactionRowModel};

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            video_id: Snowflake::new(model.video_id),
            parent_id: model.parent_id.map(Snowflake::new),
            author_id: Snowflake::new(model.author_id),
            text: model.text,
            reactions: reaction_set(model.liked_by, model.disliked_by),
            created_at: model.created_at,
            edited_at: model.edited_at,
        }
    }
}

/// Build a reaction subject from the reaction columns of a `kind` row
pub fn reaction_subject(kind: SubjectKind, row: ReactionRowModel) -> ReactionSubject {
    ReactionSubject::new(
        kind,
        Snowflake::new(row.id),
        reaction_set(row.liked_by, row.disliked_by),
        row.reaction_version,
    )
}
