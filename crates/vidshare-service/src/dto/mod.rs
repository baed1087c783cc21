//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    CreateCommentRequest, CreateVideoRequest, ListVideosQuery, LoginRequest, LogoutRequest,
    RefreshTokenRequest, RegisterRequest, SearchQuery, UpdateCommentRequest, UpdateUserRequest,
    UpdateVideoRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

// Re-export commonly used response types
pub use responses::{
    AuthResponse, AuthorResponse, ChannelResponse, CommentResponse, CurrentUserResponse,
    DeleteResponse, HealthChecks, HealthResponse, PublicUserResponse, ReactionResponse,
    ReadinessResponse, SubjectReactionResponse, VideoDetailResponse, VideoSummaryResponse,
};

// Re-export mappers and helper structs
pub use mappers::{CommentWithDetails, VideoView, VideoWithChannel};
