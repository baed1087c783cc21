//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and typed path segments.

mod auth;
mod path;
mod query;
mod validated;

pub use auth::{AuthUser, OptionalAuthUser};
pub use path::{CommentPath, IdPath, SubjectPath};
pub use query::ValidatedQuery;
pub use validated::ValidatedJson;
