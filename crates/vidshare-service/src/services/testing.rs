//! In-memory repositories and token store for service tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use vidshare_cache::{CacheResult, RefreshTokenData, TokenStore};
use vidshare_common::{JwtService, ReactionConfig};
use vidshare_core::{
    Comment, CommentRepository, DomainError, ReactionSubject, RepoResult, Snowflake,
    SnowflakeGenerator, SubjectKind, SubjectRepository, User, UserRepository, Video, VideoQuery,
    VideoRepository,
};

use super::context::ServiceContext;

#[derive(Default)]
struct State {
    users: HashMap<Snowflake, User>,
    password_hashes: HashMap<Snowflake, String>,
    videos: HashMap<Snowflake, Video>,
    comments: HashMap<Snowflake, Comment>,
    versions: HashMap<(SubjectKind, Snowflake), i64>,
    tokens: HashMap<String, RefreshTokenData>,
}

/// One store backing every repository trait
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    /// Number of upcoming subject saves to reject as concurrent writes
    forced_conflicts: AtomicU32,
    save_calls: AtomicU32,
}

impl MemoryStore {
    pub fn force_conflicts(&self, count: u32) {
        self.forced_conflicts.store(count, Ordering::SeqCst);
    }

    pub fn save_calls(&self) -> u32 {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn insert_user(&self, user: User) {
        self.state.lock().users.insert(user.id, user);
    }

    pub fn insert_video(&self, video: Video) {
        self.state.lock().videos.insert(video.id, video);
    }

    pub fn insert_comment(&self, comment: Comment) {
        self.state.lock().comments.insert(comment.id, comment);
    }

    pub fn video(&self, id: Snowflake) -> Option<Video> {
        self.state.lock().videos.get(&id).cloned()
    }

    pub fn comment(&self, id: Snowflake) -> Option<Comment> {
        self.state.lock().comments.get(&id).cloned()
    }

    pub fn comment_count(&self) -> usize {
        self.state.lock().comments.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<User>> {
        Ok(self.state.lock().users.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Snowflake]) -> RepoResult<Vec<User>> {
        let state = self.state.lock();
        Ok(ids.iter().filter_map(|id| state.users.get(id).cloned()).collect())
    }

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let state = self.state.lock();
        Ok(state
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        Ok(UserRepository::find_by_email(self, email).await?.is_some())
    }

    async fn username_exists(&self, username: &str) -> RepoResult<bool> {
        let state = self.state.lock();
        Ok(state
            .users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(username)))
    }

    async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
        let mut state = self.state.lock();
        state.users.insert(user.id, user.clone());
        state
            .password_hashes
            .insert(user.id, password_hash.to_string());
        Ok(())
    }

    async fn update(&self, user: &User) -> RepoResult<()> {
        let mut state = self.state.lock();
        match state.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(DomainError::UserNotFound(user.id)),
        }
    }

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>> {
        Ok(self.state.lock().password_hashes.get(&id).cloned())
    }
}

#[async_trait]
impl VideoRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Video>> {
        Ok(self.video(id))
    }

    async fn exists(&self, id: Snowflake) -> RepoResult<bool> {
        Ok(self.state.lock().videos.contains_key(&id))
    }

    async fn list(&self, query: VideoQuery) -> RepoResult<Vec<Video>> {
        let state = self.state.lock();
        let mut videos: Vec<Video> = state
            .videos
            .values()
            .filter(|v| query.category.as_ref().map_or(true, |c| &v.category == c))
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(b.id.cmp(&a.id)));
        Ok(videos
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .collect())
    }

    async fn search(&self, term: &str, limit: i64) -> RepoResult<Vec<Video>> {
        let term = term.to_lowercase();
        let state = self.state.lock();
        let mut videos: Vec<Video> = state
            .videos
            .values()
            .filter(|v| {
                v.title.to_lowercase().contains(&term)
                    || v.description.to_lowercase().contains(&term)
                    || v.tags.iter().any(|t| t.to_lowercase().contains(&term))
            })
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(b.id.cmp(&a.id)));
        videos.truncate(limit as usize);
        Ok(videos)
    }

    async fn create(&self, video: &Video) -> RepoResult<()> {
        self.insert_video(video.clone());
        Ok(())
    }

    async fn update_metadata(&self, video: &Video) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .videos
            .get_mut(&video.id)
            .ok_or(DomainError::VideoNotFound(video.id))?;
        stored.title.clone_from(&video.title);
        stored.description.clone_from(&video.description);
        stored.thumbnail_url.clone_from(&video.thumbnail_url);
        stored.category.clone_from(&video.category);
        stored.tags.clone_from(&video.tags);
        stored.updated_at = video.updated_at;
        Ok(())
    }

    async fn increment_views(&self, id: Snowflake) -> RepoResult<Option<i64>> {
        let mut state = self.state.lock();
        Ok(state.videos.get_mut(&id).map(|v| {
            v.views += 1;
            v.views
        }))
    }

    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let mut state = self.state.lock();
        if state.videos.remove(&id).is_none() {
            return Err(DomainError::VideoNotFound(id));
        }
        state.comments.retain(|_, c| c.video_id != id);
        Ok(())
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.state.lock().videos.len() as i64)
    }
}

#[async_trait]
impl CommentRepository for MemoryStore {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Comment>> {
        Ok(self.comment(id))
    }

    async fn find_top_level(&self, video_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let state = self.state.lock();
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.video_id == video_id && c.parent_id.is_none())
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(comments)
    }

    async fn find_replies(&self, parent_id: Snowflake) -> RepoResult<Vec<Comment>> {
        let state = self.state.lock();
        let mut comments: Vec<Comment> = state
            .comments
            .values()
            .filter(|c| c.parent_id == Some(parent_id))
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }

    async fn reply_counts(&self, parent_ids: &[Snowflake]) -> RepoResult<Vec<(Snowflake, i64)>> {
        let state = self.state.lock();
        let mut counts: HashMap<Snowflake, i64> = HashMap::new();
        for comment in state.comments.values() {
            if let Some(parent) = comment.parent_id.filter(|p| parent_ids.contains(p)) {
                *counts.entry(parent).or_default() += 1;
            }
        }
        Ok(counts.into_iter().collect())
    }

    async fn create(&self, comment: &Comment) -> RepoResult<()> {
        self.insert_comment(comment.clone());
        Ok(())
    }

    async fn update_text(&self, comment: &Comment) -> RepoResult<()> {
        let mut state = self.state.lock();
        let stored = state
            .comments
            .get_mut(&comment.id)
            .ok_or(DomainError::CommentNotFound(comment.id))?;
        stored.text.clone_from(&comment.text);
        stored.edited_at = comment.edited_at;
        Ok(())
    }

    async fn delete_with_replies(&self, id: Snowflake) -> RepoResult<u64> {
        let mut state = self.state.lock();
        if state.comments.remove(&id).is_none() {
            return Err(DomainError::CommentNotFound(id));
        }
        let mut removed = 1;
        let mut frontier = vec![id];
        while let Some(parent) = frontier.pop() {
            let answers: Vec<Snowflake> = state
                .comments
                .values()
                .filter(|c| c.parent_id == Some(parent))
                .map(|c| c.id)
                .collect();
            for answer in answers {
                state.comments.remove(&answer);
                frontier.push(answer);
                removed += 1;
            }
        }
        Ok(removed)
    }
}

#[async_trait]
impl SubjectRepository for MemoryStore {
    async fn load(&self, kind: SubjectKind, id: Snowflake) -> RepoResult<Option<ReactionSubject>> {
        let state = self.state.lock();
        let reactions = match kind {
            SubjectKind::Video => state.videos.get(&id).map(|v| v.reactions.clone()),
            SubjectKind::Comment => state.comments.get(&id).map(|c| c.reactions.clone()),
        };
        let version = state.versions.get(&(kind, id)).copied().unwrap_or(0);
        Ok(reactions.map(|r| ReactionSubject::new(kind, id, r, version)))
    }

    async fn save(&self, subject: &ReactionSubject) -> RepoResult<()> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        let conflict = DomainError::ConcurrentModification {
            kind: subject.kind,
            id: subject.id,
        };
        if self
            .forced_conflicts
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(conflict);
        }

        let mut state = self.state.lock();
        let key = (subject.kind, subject.id);
        if state.versions.get(&key).copied().unwrap_or(0) != subject.version {
            return Err(conflict);
        }
        let reactions = match subject.kind {
            SubjectKind::Video => state.videos.get_mut(&subject.id).map(|v| &mut v.reactions),
            SubjectKind::Comment => state.comments.get_mut(&subject.id).map(|c| &mut c.reactions),
        };
        let Some(reactions) = reactions else {
            return Err(DomainError::SubjectNotFound {
                kind: subject.kind,
                id: subject.id,
            });
        };
        *reactions = subject.reactions.clone();
        state.versions.insert(key, subject.version + 1);
        Ok(())
    }
}

#[async_trait]
impl TokenStore for MemoryStore {
    async fn store(&self, jti: &str, user_id: Snowflake) -> CacheResult<()> {
        self.state
            .lock()
            .tokens
            .insert(jti.to_string(), RefreshTokenData::new(user_id));
        Ok(())
    }

    async fn consume(&self, jti: &str) -> CacheResult<Option<RefreshTokenData>> {
        Ok(self.state.lock().tokens.remove(jti))
    }

    async fn revoke(&self, jti: &str) -> CacheResult<bool> {
        Ok(self.state.lock().tokens.remove(jti).is_some())
    }

    async fn revoke_all_for_user(&self, user_id: Snowflake) -> CacheResult<u64> {
        let mut state = self.state.lock();
        let before = state.tokens.len();
        state.tokens.retain(|_, data| data.user_id != user_id);
        Ok((before - state.tokens.len()) as u64)
    }
}

/// A service context wired to a fresh [`MemoryStore`]
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub store: Arc<MemoryStore>,
    generator: Arc<SnowflakeGenerator>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_reaction_attempts(ReactionConfig::default().max_attempts)
    }

    pub fn with_reaction_attempts(max_attempts: u32) -> Self {
        let store = Arc::new(MemoryStore::default());
        let generator = Arc::new(SnowflakeGenerator::new(1));
        let ctx = ServiceContext::builder()
            .user_repo(store.clone())
            .video_repo(store.clone())
            .comment_repo(store.clone())
            .subject_repo(store.clone())
            .token_store(store.clone())
            .jwt_service(Arc::new(JwtService::new(
                "test-secret-key-that-is-long-enough",
                900,
                604_800,
            )))
            .snowflake_generator(generator.clone())
            .reactions(ReactionConfig { max_attempts })
            .build()
            .expect("complete test context");
        Self {
            ctx,
            store,
            generator,
        }
    }

    pub fn user(&self, username: &str) -> User {
        let user = User::new(
            self.generator.generate(),
            username.to_string(),
            format!("{username}@example.com"),
        );
        self.store.insert_user(user.clone());
        user
    }

    pub fn admin(&self, username: &str) -> User {
        let mut user = self.user(username);
        user.is_admin = true;
        self.store.insert_user(user.clone());
        user
    }

    pub fn video(&self, uploader: &User, title: &str) -> Video {
        let video = Video::new(
            self.generator.generate(),
            uploader.id,
            title.to_string(),
            "https://cdn.example.com/video.mp4".to_string(),
        );
        self.store.insert_video(video.clone());
        video
    }

    pub fn comment(&self, video: &Video, author: &User, parent: Option<&Comment>) -> Comment {
        let comment = Comment::new(
            self.generator.generate(),
            video.id,
            author.id,
            "comment".to_string(),
            parent,
        );
        self.store.insert_comment(comment.clone());
        comment
    }
}
