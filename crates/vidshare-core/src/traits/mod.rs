//! Repository traits (ports) implemented by the persistence layer

mod repositories;

pub use repositories::{
    CommentRepository, RepoResult, SubjectRepository, UserRepository, VideoQuery,
    VideoRepository,
};
