//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod reaction;
pub mod seed;
pub mod user;
pub mod video;

#[cfg(test)]
pub(crate) mod testing;

// Re-export all services for convenience
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use reaction::{apply_with_retry, ReactionService};
pub use seed::{seed_demo_data, SeedReport, DEMO_PASSWORD};
pub use user::UserService;
pub use video::{VideoService, SEARCH_LIMIT};
