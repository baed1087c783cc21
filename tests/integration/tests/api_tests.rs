//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error_code, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

async fn register(server: &TestServer) -> AuthResponse {
    let request = RegisterRequest::unique();
    let response = server.post("/auth/register", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn upload(server: &TestServer, token: &str) -> VideoResponse {
    let response = server
        .post_auth("/videos", token, &CreateVideoRequest::unique())
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn comment(
    server: &TestServer,
    token: &str,
    video_id: &str,
    request: &CreateCommentRequest,
) -> CommentResponse {
    let response = server
        .post_auth(&format!("/comments/{video_id}"), token, request)
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_raw("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get_raw("/health/ready").await.expect("Request failed");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "healthy");
    assert_eq!(body["checks"]["redis"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.token_type, "Bearer");

    let response = server
        .post("/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let login: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.user.id, auth.user.id);

    let response = server.get_auth("/auth/me", &login.access_token).await.unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, request.email);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server.post("/auth/register", &request).await.unwrap();

    let response = server.post("/auth/register", &request).await.unwrap();
    let code = assert_error_code(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let login_req = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "wrongpass1".to_string(),
    };

    let response = server.post("/auth/login", &login_req).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_rotates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let request = RefreshTokenRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server.post("/auth/refresh", &request).await.unwrap();
    let rotated: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(rotated.refresh_token, auth.refresh_token);

    // The consumed token cannot be replayed
    let response = server.post("/auth/refresh", &request).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_me_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/auth/me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Video Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_fetch_video() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let video = upload(&server, &auth.access_token).await;
    assert_eq!(video.category, "education");
    assert_eq!(video.views, 0);

    let response = server.get(&format!("/videos/{}", video.id)).await.unwrap();
    let fetched: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.title, video.title);
    assert_eq!(fetched.views, 1);
}

#[tokio::test]
async fn test_unknown_video_is_404() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/videos/1").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_only_uploader_deletes_video() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let stranger = register(&server).await;
    let video = upload(&server, &owner.access_token).await;
    let path = format!("/videos/{}", video.id);

    let response = server.delete_auth(&path, &stranger.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_like_dislike_walkthrough() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let video = upload(&server, &auth.access_token).await;
    let token = &auth.access_token;

    let like = format!("/subjects/video/{}/like", video.id);
    let dislike = format!("/subjects/video/{}/dislike", video.id);

    let response = server.post_empty_auth(&like, token).await.unwrap();
    let state: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(state.id, video.id);
    assert_eq!((state.like_count, state.dislike_count), (1, 0));
    assert!(state.is_liked);

    let response = server.post_empty_auth(&dislike, token).await.unwrap();
    let state: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((state.like_count, state.dislike_count), (0, 1));
    assert!(state.is_disliked && !state.is_liked);

    // Disliking again toggles back to neutral
    let response = server.post_empty_auth(&dislike, token).await.unwrap();
    let state: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!((state.like_count, state.dislike_count), (0, 0));
    assert!(!state.is_liked && !state.is_disliked);

    // The video page reflects the shortcut route too
    let response = server
        .post_empty_auth(&format!("/videos/{}/like", video.id), token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server
        .get_auth(&format!("/videos/{}", video.id), token)
        .await
        .unwrap();
    let page: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.like_count, 1);
    assert!(page.is_liked);
}

#[tokio::test]
async fn test_reaction_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post("/subjects/video/1/like", &serde_json::json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_reaction_rejects_unknown_kind() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let response = server
        .post_empty_auth("/subjects/playlist/1/like", &auth.access_token)
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "INVALID_PATH_PARAMETER");
}

#[tokio::test]
async fn test_reaction_on_missing_subject_is_404() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;

    let response = server
        .post_empty_auth("/subjects/comment/1/like", &auth.access_token)
        .await
        .unwrap();
    let code = assert_error_code(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_SUBJECT");
}

#[tokio::test]
async fn test_concurrent_likes_are_all_counted() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = register(&server).await;
    let video = upload(&server, &owner.access_token).await;

    let mut tokens = Vec::new();
    for _ in 0..8 {
        tokens.push(register(&server).await.access_token);
    }

    let path = format!("/subjects/video/{}/like", video.id);
    let mut tasks = Vec::new();
    for token in tokens {
        let client = server.client.clone();
        let url = server.api_url(&path);
        tasks.push(tokio::spawn(async move {
            client.post(url).bearer_auth(token).send().await
        }));
    }
    for task in tasks {
        let response = task.await.unwrap().unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = server.get(&format!("/videos/{}", video.id)).await.unwrap();
    let page: VideoResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.like_count, 8);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_thread_and_cascade_delete() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register(&server).await;
    let token = &auth.access_token;
    let video = upload(&server, token).await;

    let root = comment(&server, token, &video.id, &CreateCommentRequest::top_level("First!")).await;
    assert_eq!(root.reply_count, Some(0));
    assert_eq!(root.video_id, video.id);

    let reply = comment(
        &server,
        token,
        &video.id,
        &CreateCommentRequest::reply("Agreed", &root.id),
    )
    .await;
    assert_eq!(reply.parent_id.as_deref(), Some(root.id.as_str()));

    let nested = comment(
        &server,
        token,
        &video.id,
        &CreateCommentRequest::reply("Same", &reply.id),
    )
    .await;
    assert_eq!(nested.parent_id.as_deref(), Some(reply.id.as_str()));

    let response = server
        .get(&format!("/comments/{}", video.id))
        .await
        .unwrap();
    let top: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].reply_count, Some(1));

    let response = server
        .get(&format!("/comments/{}/{}/replies", video.id, reply.id))
        .await
        .unwrap();
    let answers: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(answers.len(), 1);
    assert_eq!(answers[0].id, nested.id);

    // Deleting the reply takes its answer with it
    let response = server
        .delete_auth(&format!("/comments/{}/{}", video.id, reply.id), token)
        .await
        .unwrap();
    let deleted: DeleteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.deleted, 2);

    let response = server
        .get(&format!("/comments/{}/{}/replies", video.id, root.id))
        .await
        .unwrap();
    let replies: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(replies.is_empty());

    let response = server
        .delete_auth(&format!("/comments/{}/{}", video.id, root.id), token)
        .await
        .unwrap();
    let deleted: DeleteResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(deleted.deleted, 1);

    let response = server
        .get(&format!("/comments/{}", video.id))
        .await
        .unwrap();
    let top: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(top.is_empty());
}

#[tokio::test]
async fn test_comment_like_and_edit() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = register(&server).await;
    let other = register(&server).await;
    let video = upload(&server, &author.access_token).await;
    let root = comment(
        &server,
        &author.access_token,
        &video.id,
        &CreateCommentRequest::top_level("Nice video"),
    )
    .await;
    let path = format!("/comments/{}/{}", video.id, root.id);

    let response = server
        .post_empty_auth(&format!("{path}/like"), &other.access_token)
        .await
        .unwrap();
    let state: ReactionResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(state.id, root.id);
    assert_eq!(state.like_count, 1);

    let edit = serde_json::json!({ "text": "Nice video, edited" });
    let response = server.put_auth(&path, &other.access_token, &edit).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.put_auth(&path, &author.access_token, &edit).await.unwrap();
    let edited: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.text, "Nice video, edited");
}
