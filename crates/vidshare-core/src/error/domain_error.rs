//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{Snowflake, SubjectKind};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found: {0}")]
    UserNotFound(Snowflake),

    #[error("Video not found: {0}")]
    VideoNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Parent comment not found: {0}")]
    ParentCommentNotFound(Snowflake),

    #[error("{kind} not found: {id}")]
    SubjectNotFound { kind: SubjectKind, id: Snowflake },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Not comment author")]
    NotCommentAuthor,

    #[error("Not video uploader")]
    NotVideoUploader,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already taken")]
    UsernameAlreadyExists,

    #[error("{kind} {id} was modified concurrently")]
    ConcurrentModification { kind: SubjectKind, id: Snowflake },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::VideoNotFound(_) => "UNKNOWN_VIDEO",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ParentCommentNotFound(_) => "UNKNOWN_PARENT_COMMENT",
            Self::SubjectNotFound { .. } => "UNKNOWN_SUBJECT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotCommentAuthor => "NOT_COMMENT_AUTHOR",
            Self::NotVideoUploader => "NOT_VIDEO_UPLOADER",

            // Conflict
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::CacheError(_) => "CACHE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::VideoNotFound(_)
                | Self::CommentNotFound(_)
                | Self::ParentCommentNotFound(_)
                | Self::SubjectNotFound { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotCommentAuthor | Self::NotVideoUploader)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::UsernameAlreadyExists
                | Self::ConcurrentModification { .. }
        )
    }

    /// Whether retrying the same load-apply-save cycle may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification { .. })
    }
}
