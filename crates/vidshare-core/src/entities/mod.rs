//! Domain entities - core business objects

mod comment;
mod subject;
mod user;
mod video;

pub use comment::{normalize_comment_text, Comment, MAX_COMMENT_LENGTH};
pub use subject::ReactionSubject;
pub use user::{User, UserPatch, DEFAULT_AVATAR_URL};
pub use video::{normalize_category, normalize_tags, Video, VideoPatch};
