//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{Comment, ReactionSubject, User, Video};
use crate::error::DomainError;
use crate::value_objects::{Snowflake, SubjectKind};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>>;

    /// Fetch several users at once; missing IDs are skipped
    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>>;

    /// Find user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()>;

    /// Update profile fields
    async fn update(&self, user: &User) -> RepoResult<()>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Video Repository
// ============================================================================

/// Filter and page for the video feed
#[derive(Debug, Clone, Default)]
pub struct VideoQuery {
    pub category: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>>;

    async fn exists(&self, id: Snowflake) -> RepoResult<bool>;

    /// Newest uploads first
    async fn list(&self, query: VideoQuery) -> RepoResult<Vec<Video>>;

    /// Case-insensitive substring match on title, description, or any tag
    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<Video>>;

    async fn create(&self, video: &Video) -> RepoResult<()>;

    /// Persist metadata fields; reactions and views are written elsewhere
    async fn update_metadata(&self, video: &Video) -> RepoResult<()>;

    /// Atomically bump the view counter, returning the new count
    async fn increment_views(&self, id: Snowflake) -> RepoResult<Option<i64>>;

    /// Delete the video and all of its comments
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;

    async fn count(&self) -> RepoResult<i64>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>>;

    /// Top-level comments of a video, newest first
    async fn find_top_level(&self, video_id: Snowflake) -> RepoResult<Vec<Comment>>;

    /// Direct replies to a comment, oldest first
    async fn find_replies(&self, parent_id: Snowflake) -> RepoResult<Vec<Comment>>;

    /// Reply counts for the given parents; parents without replies are omitted
    async fn reply_counts(&self, parent_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>>;

    async fn create(&self, comment: &Comment) -> RepoResult<()>;

    /// Persist edited text and edit timestamp
    async fn update_text(&self, comment: &Comment) -> RepoResult<()>;

    /// Delete a comment and every reply beneath it, at any depth, in one
    /// transaction. Returns the number of rows removed.
    async fn delete_with_replies(&self, id: Snowflake) -> RepoResult<u64>;
}

// ============================================================================
// Subject Repository
// ============================================================================

/// Load/save contract for anything that can be liked or disliked
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// `Ok(None)` when no subject of that kind has the ID
    async fn load(&self, kind: SubjectKind, id: Snowflake) -> RepoResult<Option<ReactionSubject>>;

    /// Write the reaction sets and their counts together.
    ///
    /// Fails with [`DomainError::ConcurrentModification`] when the stored
    /// version no longer equals `subject.version`. On success the stored
    /// version is `subject.version + 1`.
    async fn save(&self, subject: &ReactionSubject) -> RepoResult<()>;
}
