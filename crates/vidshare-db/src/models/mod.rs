//! Database models - SQLx-compatible structs for PostgreSQL tables

mod comment;
mod reaction;
mod user;
mod video;

pub use comment::{CommentModel, ReplyCountModel};
pub use reaction::ReactionRowModel;
pub use user::UserModel;
pub use video::VideoModel;
