//! Comment entity - threaded comments on a video

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::ledger::{HasReactions, ReactionSet};
use crate::value_objects::Snowflake;

pub const MAX_COMMENT_LENGTH: usize = 10_000;

/// A comment on a video.
///
/// Top-level comments have no `parent_id`. A reply keeps the id of the
/// comment it answers, which may itself be a reply, so deleting a comment
/// also removes everything that answers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub video_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub text: String,
    pub reactions: ReactionSet,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Create a top-level comment, or a reply when `parent` is given.
    pub fn new(
        id: Snowflake,
        video_id: Snowflake,
        author_id: Snowflake,
        text: String,
        parent: Option<&Comment>,
    ) -> Self {
        Self {
            id,
            video_id,
            parent_id: parent.map(|p| p.id),
            author_id,
            text,
            reactions: ReactionSet::new(),
            created_at: Utc::now(),
            edited_at: None,
        }
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    pub fn edit(&mut self, text: String) {
        self.text = text;
        self.edited_at = Some(Utc::now());
    }
}

impl HasReactions for Comment {
    fn reactions(&self) -> &ReactionSet {
        &self.reactions
    }

    fn reactions_mut(&mut self) -> &mut ReactionSet {
        &mut self.reactions
    }
}

/// Trim comment text and enforce the length bounds
pub fn normalize_comment_text(raw: &str) -> Result<String, DomainError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(DomainError::ValidationError(
            "Comment text is required".to_string(),
        ));
    }
    if text.chars().count() > MAX_COMMENT_LENGTH {
        return Err(DomainError::ContentTooLong {
            max: MAX_COMMENT_LENGTH,
        });
    }
    Ok(text.to_string())
}
