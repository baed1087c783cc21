//! Comment service
//!
//! A reply keeps the parent it was posted under, which may itself be a
//! reply.

use std::collections::HashMap;

use tracing::{info, instrument};
use vidshare_core::{
    normalize_comment_text, Comment, DomainError, ReactionAction, Snowflake, SubjectKind, User,
};

use crate::dto::{
    CommentResponse, CommentWithDetails, CreateCommentRequest, DeleteResponse,
    SubjectReactionResponse, UpdateCommentRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::reaction::ReactionService;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Top-level comments of a video, newest first, with reply counts
    #[instrument(skip(self))]
    pub async fn list_top_level(&self, video_id: Snowflake) -> ServiceResult<Vec<CommentResponse>> {
        self.ensure_video(video_id).await?;

        let comments = self.ctx.comment_repo().find_top_level(video_id).await?;
        let ids: Vec<Snowflake> = comments.iter().map(|c| c.id).collect();
        let reply_counts: HashMap<Snowflake, i64> = self
            .ctx
            .comment_repo()
            .reply_counts(&ids)
            .await?
            .into_iter()
            .collect();

        let authors = self.authors_of(&comments).await?;
        Ok(comments
            .into_iter()
            .map(|comment| {
                let reply_count = Some(reply_counts.get(&comment.id).copied().unwrap_or(0));
                let author = authors.get(&comment.author_id).cloned();
                CommentResponse::from(CommentWithDetails {
                    comment,
                    author,
                    reply_count,
                })
            })
            .collect())
    }

    /// Direct replies to one comment, oldest first
    #[instrument(skip(self))]
    pub async fn list_replies(
        &self,
        video_id: Snowflake,
        comment_id: Snowflake,
    ) -> ServiceResult<Vec<CommentResponse>> {
        self.find_on_video(video_id, comment_id).await?;

        let replies = self.ctx.comment_repo().find_replies(comment_id).await?;
        let authors = self.authors_of(&replies).await?;
        Ok(replies
            .into_iter()
            .map(|comment| {
                let author = authors.get(&comment.author_id).cloned();
                CommentResponse::from(CommentWithDetails {
                    comment,
                    author,
                    reply_count: None,
                })
            })
            .collect())
    }

    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        video_id: Snowflake,
        author_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let text = normalize_comment_text(&request.text)?;
        self.ensure_video(video_id).await?;

        let parent = match request.parent_id {
            Some(parent_id) => Some(
                self.ctx
                    .comment_repo()
                    .find_by_id(parent_id)
                    .await?
                    .filter(|p| p.video_id == video_id)
                    .ok_or(DomainError::ParentCommentNotFound(parent_id))?,
            ),
            None => None,
        };

        let author = self
            .ctx
            .user_repo()
            .find_by_id(author_id)
            .await?
            .ok_or(DomainError::UserNotFound(author_id))?;

        let comment = Comment::new(
            self.ctx.generate_id(),
            video_id,
            author.id,
            text,
            parent.as_ref(),
        );
        self.ctx.comment_repo().create(&comment).await?;

        info!(
            comment_id = %comment.id,
            video_id = %video_id,
            parent_id = ?comment.parent_id,
            "Comment created"
        );

        let reply_count = comment.parent_id.is_none().then_some(0);
        Ok(CommentResponse::from(CommentWithDetails {
            comment,
            author: Some(author),
            reply_count,
        }))
    }

    /// Author-only text edit
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        video_id: Snowflake,
        comment_id: Snowflake,
        actor_id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let text = normalize_comment_text(&request.text)?;
        let mut comment = self.find_on_video(video_id, comment_id).await?;

        if !comment.is_authored_by(actor_id) {
            return Err(DomainError::NotCommentAuthor.into());
        }

        comment.edit(text);
        self.ctx.comment_repo().update_text(&comment).await?;

        info!(comment_id = %comment.id, "Comment edited");

        let author = self.ctx.user_repo().find_by_id(comment.author_id).await?;
        let reply_count = match comment.parent_id {
            Some(_) => None,
            None => Some(
                self.ctx
                    .comment_repo()
                    .reply_counts(&[comment.id])
                    .await?
                    .first()
                    .map_or(0, |(_, count)| *count),
            ),
        };
        Ok(CommentResponse::from(CommentWithDetails {
            comment,
            author,
            reply_count,
        }))
    }

    /// Author or admin; every reply beneath the comment is removed with it
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        video_id: Snowflake,
        comment_id: Snowflake,
        actor_id: Snowflake,
    ) -> ServiceResult<DeleteResponse> {
        let comment = self.find_on_video(video_id, comment_id).await?;

        if !comment.is_authored_by(actor_id) {
            let is_admin = self
                .ctx
                .user_repo()
                .find_by_id(actor_id)
                .await?
                .is_some_and(|u| u.is_admin);
            if !is_admin {
                return Err(DomainError::NotCommentAuthor.into());
            }
        }

        let deleted = self.ctx.comment_repo().delete_with_replies(comment.id).await?;

        info!(comment_id = %comment.id, deleted, "Comment deleted");

        Ok(DeleteResponse {
            message: "Comment deleted".to_string(),
            deleted,
        })
    }

    /// Like or dislike a comment addressed through its video
    pub async fn react(
        &self,
        video_id: Snowflake,
        comment_id: Snowflake,
        user_id: Snowflake,
        action: ReactionAction,
    ) -> ServiceResult<SubjectReactionResponse> {
        self.find_on_video(video_id, comment_id).await?;
        ReactionService::new(self.ctx)
            .react(SubjectKind::Comment, comment_id, user_id, action)
            .await
    }

    async fn ensure_video(&self, video_id: Snowflake) -> ServiceResult<()> {
        if self.ctx.video_repo().exists(video_id).await? {
            Ok(())
        } else {
            Err(DomainError::VideoNotFound(video_id).into())
        }
    }

    async fn find_on_video(
        &self,
        video_id: Snowflake,
        comment_id: Snowflake,
    ) -> ServiceResult<Comment> {
        Ok(self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.video_id == video_id)
            .ok_or(DomainError::CommentNotFound(comment_id))?)
    }

    async fn authors_of(&self, comments: &[Comment]) -> ServiceResult<HashMap<Snowflake, User>> {
        let mut ids: Vec<Snowflake> = comments.iter().map(|c| c.author_id).collect();
        ids.sort_unstable();
        ids.dedup();

        Ok(self
            .ctx
            .user_repo()
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::TestHarness;

    fn create_request(text: &str, parent_id: Option<Snowflake>) -> CreateCommentRequest {
        CreateCommentRequest {
            text: text.to_string(),
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_reply_to_reply_keeps_requested_parent() {
        let harness = TestHarness::new();
        let alice = harness.user("alice");
        let video = harness.video(&alice, "Intro");
        let service = CommentService::new(&harness.ctx);

        let root = service
            .create(video.id, alice.id, create_request("root", None))
            .await
            .unwrap();
        let root_id = Snowflake::parse(&root.id).unwrap();
        let reply = service
            .create(video.id, alice.id, create_request("reply", Some(root_id)))
            .await
            .unwrap();
        let reply_id = Snowflake::parse(&reply.id).unwrap();
        let nested = service
            .create(video.id, alice.id, create_request("nested", Some(reply_id)))
            .await
            .unwrap();

        assert_eq!(root.reply_count, Some(0));
        assert_eq!(reply.parent_id.as_deref(), Some(root.id.as_str()));
        assert_eq!(nested.parent_id.as_deref(), Some(reply.id.as_str()));
        let stored = harness
            .store
            .comment(Snowflake::parse(&nested.id).unwrap())
            .unwrap();
        assert_eq!(stored.parent_id, Some(reply_id));

        let listed = service.list_top_level(video.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].reply_count, Some(1));

        let replies = service.list_replies(video.id, root_id).await.unwrap();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].text, "reply");

        let answers = service.list_replies(video.id, reply_id).await.unwrap();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].text, "nested");
    }

    #[tokio::test]
    async fn test_deleting_reply_removes_its_answers() {
        let harness = TestHarness::new();
        let alice = harness.user("alice");
        let video = harness.video(&alice, "Intro");
        let root = harness.comment(&video, &alice, None);
        let reply = harness.comment(&video, &alice, Some(&root));
        let answer = harness.comment(&video, &alice, Some(&reply));
        let sibling = harness.comment(&video, &alice, Some(&root));

        let result = CommentService::new(&harness.ctx)
            .delete(video.id, reply.id, alice.id)
            .await
            .unwrap();

        assert_eq!(result.deleted, 2);
        assert!(harness.store.comment(reply.id).is_none());
        assert!(harness.store.comment(answer.id).is_none());
        assert!(harness.store.comment(root.id).is_some());
        assert!(harness.store.comment(sibling.id).is_some());
        assert_eq!(harness.store.comment_count(), 2);
    }

    #[tokio::test]
    async fn test_create_validates_text_and_parent() {
        let harness = TestHarness::new();
        let alice = harness.user("alice");
        let video = harness.video(&alice, "Intro");
        let other_video = harness.video(&alice, "Other");
        let foreign = harness.comment(&other_video, &alice, None);
        let service = CommentService::new(&harness.ctx);

        let blank = service
            .create(video.id, alice.id, create_request("   ", None))
            .await
            .unwrap_err();
        assert_eq!(blank.status_code(), 400);

        let too_long = service
            .create(video.id, alice.id, create_request(&"a".repeat(10_001), None))
            .await
            .unwrap_err();
        assert_eq!(too_long.error_code(), "CONTENT_TOO_LONG");

        let wrong_video = service
            .create(video.id, alice.id, create_request("hi", Some(foreign.id)))
            .await
            .unwrap_err();
        assert_eq!(wrong_video.error_code(), "UNKNOWN_PARENT_COMMENT");

        let missing_video = service
            .create(Snowflake::new(1), alice.id, create_request("hi", None))
            .await
            .unwrap_err();
        assert_eq!(missing_video.error_code(), "UNKNOWN_VIDEO");
    }

    #[tokio::test]
    async fn test_delete_removes_thread_and_leaves_others() {
        let harness = TestHarness::new();
        let alice = harness.user("alice");
        let bob = harness.user("bob");
        let video = harness.video(&alice, "Intro");
        let root = harness.comment(&video, &bob, None);
        harness.comment(&video, &alice, Some(&root));
        harness.comment(&video, &alice, Some(&root));
        let unrelated = harness.comment(&video, &alice, None);
        let unrelated_reply = harness.comment(&video, &bob, Some(&unrelated));

        let service = CommentService::new(&harness.ctx);
        let err = service.delete(video.id, root.id, alice.id).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let result = service.delete(video.id, root.id, bob.id).await.unwrap();
        assert_eq!(result.deleted, 3);
        assert_eq!(harness.store.comment_count(), 2);
        assert!(harness.store.comment(unrelated.id).is_some());
        assert!(harness.store.comment(unrelated_reply.id).is_some());
    }

    #[tokio::test]
    async fn test_admin_may_delete_any_comment() {
        let harness = TestHarness::new();
        let alice = harness.user("alice");
        let admin = harness.admin("moderator");
        let video = harness.video(&alice, "Intro");
        let comment = harness.comment(&video, &alice, None);

        let result = CommentService::new(&harness.ctx)
            .delete(video.id, comment.id, admin.id)
            .await
            .unwrap();
        assert_eq!(result.deleted, 1);
    }

    #[tokio::test]
    async fn test_update_is_author_only() {
        let harness = TestHarness::new();
        let alice = harness.user("alice");
        let bob = harness.user("bob");
        let video = harness.video(&alice, "Intro");
        let comment = harness.comment(&video, &alice, None);
        let service = CommentService::new(&harness.ctx);

        let err = service
            .update(
                video.id,
                comment.id,
                bob.id,
                UpdateCommentRequest {
                    text: "hijacked".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "NOT_COMMENT_AUTHOR");

        let edited = service
            .update(
                video.id,
                comment.id,
                alice.id,
                UpdateCommentRequest {
                    text: "  fixed typo ".to_string(),
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.text, "fixed typo");
        assert!(edited.edited_at.is_some());
    }

    #[tokio::test]
    async fn test_react_requires_comment_on_that_video() {
        let harness = TestHarness::new();
        let alice = harness.user("alice");
        let video = harness.video(&alice, "Intro");
        let other = harness.video(&alice, "Other");
        let comment = harness.comment(&video, &alice, None);
        let service = CommentService::new(&harness.ctx);

        let err = service
            .react(other.id, comment.id, alice.id, ReactionAction::Like)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_COMMENT");

        let liked = service
            .react(video.id, comment.id, alice.id, ReactionAction::Like)
            .await
            .unwrap();
        assert!(liked.reaction.is_liked);
    }
}
