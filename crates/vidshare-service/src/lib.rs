//! # vidshare-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::*;
pub use services::{
    apply_with_retry, seed_demo_data, AuthService, CommentService, ReactionService, SeedReport,
    ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult, UserService,
    VideoService,
};
