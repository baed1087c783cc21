//! # vidshare-core
//!
//! Domain layer containing entities, the reaction ledger, value objects,
//! and repository traits. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod ledger;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    normalize_category, normalize_comment_text, normalize_tags, Comment, ReactionSubject, User,
    UserPatch, Video, VideoPatch, DEFAULT_AVATAR_URL, MAX_COMMENT_LENGTH,
};
pub use error::DomainError;
pub use ledger::{HasReactions, ReactionLedger, ReactionOutcome, ReactionSet};
pub use traits::{
    CommentRepository, RepoResult, SubjectRepository, UserRepository, VideoQuery,
    VideoRepository,
};
pub use value_objects::{
    ReactionAction, ReactionState, Snowflake, SnowflakeGenerator, SnowflakeParseError,
    SubjectKind, UnknownSubjectKind,
};
