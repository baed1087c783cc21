//! Subject kinds and reaction vocabulary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two entity kinds that can receive likes and dislikes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    Video,
    Comment,
}

impl SubjectKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown subject kind: {0}")]
pub struct UnknownSubjectKind(pub String);

impl FromStr for SubjectKind {
    type Err = UnknownSubjectKind;

    /// Accepts singular and plural forms, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "video" | "videos" => Ok(Self::Video),
            "comment" | "comments" => Ok(Self::Comment),
            _ => Err(UnknownSubjectKind(s.to_string())),
        }
    }
}

/// What a user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionAction {
    Like,
    Dislike,
}

impl ReactionAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

impl fmt::Display for ReactionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a single user stands on a single subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReactionState {
    #[default]
    Neutral,
    Liked,
    Disliked,
}

impl ReactionState {
    /// Transition table of the per-user state machine.
    ///
    /// Repeating the action that produced the current state returns to
    /// `Neutral`; the opposite action switches sides.
    pub const fn next(self, action: ReactionAction) -> Self {
        match (self, action) {
            (Self::Liked, ReactionAction::Like) | (Self::Disliked, ReactionAction::Dislike) => {
                Self::Neutral
            }
            (_, ReactionAction::Like) => Self::Liked,
            (_, ReactionAction::Dislike) => Self::Disliked,
        }
    }

    #[inline]
    pub const fn is_liked(self) -> bool {
        matches!(self, Self::Liked)
    }

    #[inline]
    pub const fn is_disliked(self) -> bool {
        matches!(self, Self::Disliked)
    }
}
