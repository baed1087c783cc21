//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in vidshare-core.

mod comment;
mod error;
mod subject;
mod user;
mod video;

pub use comment::PgCommentRepository;
pub use subject::PgSubjectRepository;
pub use user::PgUserRepository;
pub use video::PgVideoRepository;
