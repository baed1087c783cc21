//! Route definitions
//!
//! All API routes organized by resource and mounted under /api/v1.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{auth, comments, health, reactions, users, videos};
use crate::state::AppState;

/// API routes under `/api/v1` (health is mounted separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes, kept outside rate limiting
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(video_routes())
        .merge(comment_routes())
        .merge(subject_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", patch(users::update_current_user))
        .route("/users/:id", get(users::get_user))
}

fn video_routes() -> Router<AppState> {
    Router::new()
        .route("/videos", get(videos::list_videos).post(videos::create_video))
        .route("/videos/search", get(videos::search_videos))
        .route(
            "/videos/:id",
            get(videos::get_video)
                .patch(videos::update_video)
                .delete(videos::delete_video),
        )
        .route("/videos/:id/like", post(reactions::like_video))
        .route("/videos/:id/dislike", post(reactions::dislike_video))
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/comments/:video_id",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/comments/:video_id/:comment_id",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .route(
            "/comments/:video_id/:comment_id/replies",
            get(comments::list_replies),
        )
        .route(
            "/comments/:video_id/:comment_id/like",
            post(reactions::like_comment),
        )
        .route(
            "/comments/:video_id/:comment_id/dislike",
            post(reactions::dislike_comment),
        )
}

fn subject_routes() -> Router<AppState> {
    Router::new()
        .route("/subjects/:kind/:id/like", post(reactions::like_subject))
        .route("/subjects/:kind/:id/dislike", post(reactions::dislike_subject))
}
