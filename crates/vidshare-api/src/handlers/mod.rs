//! HTTP request handlers, one module per resource

pub mod auth;
pub mod comments;
pub mod health;
pub mod reactions;
pub mod users;
pub mod videos;
