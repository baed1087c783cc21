//! Service context - dependency container for services
//!
//! Holds the repositories, the refresh-token store, and the stateless
//! helpers every service needs.

use std::sync::Arc;

use vidshare_cache::TokenStore;
use vidshare_common::{JwtService, PasswordService, ReactionConfig};
use vidshare_core::{
    CommentRepository, Snowflake, SnowflakeGenerator, SubjectRepository, UserRepository,
    VideoRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn UserRepository>,
    video_repo: Arc<dyn VideoRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    subject_repo: Arc<dyn SubjectRepository>,

    // Sessions
    token_store: Arc<dyn TokenStore>,

    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
    snowflake_generator: Arc<SnowflakeGenerator>,
    reactions: ReactionConfig,
}

impl ServiceContext {
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn video_repo(&self) -> &dyn VideoRepository {
        self.video_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn subject_repo(&self) -> &dyn SubjectRepository {
        self.subject_repo.as_ref()
    }

    // === Sessions ===

    pub fn token_store(&self) -> &dyn TokenStore {
        self.token_store.as_ref()
    }

    // === Helpers ===

    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }

    /// Load-apply-save attempts per reaction before giving up
    pub fn reaction_attempts(&self) -> u32 {
        self.reactions.max_attempts
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .field("worker_id", &self.snowflake_generator.worker_id())
            .field("reactions", &self.reactions)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    video_repo: Option<Arc<dyn VideoRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    subject_repo: Option<Arc<dyn SubjectRepository>>,
    token_store: Option<Arc<dyn TokenStore>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    reactions: Option<ReactionConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn video_repo(mut self, repo: Arc<dyn VideoRepository>) -> Self {
        self.video_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn subject_repo(mut self, repo: Arc<dyn SubjectRepository>) -> Self {
        self.subject_repo = Some(repo);
        self
    }

    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.token_store = Some(store);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Optional; defaults to [`ReactionConfig::default`]
    pub fn reactions(mut self, config: ReactionConfig) -> Self {
        self.reactions = Some(config);
        self
    }

    /// # Errors
    /// Returns `ServiceError::Internal` naming the first missing dependency
    pub fn build(self) -> ServiceResult<ServiceContext> {
        fn required<T>(value: Option<T>, name: &str) -> ServiceResult<T> {
            value.ok_or_else(|| ServiceError::internal(format!("{name} is required")))
        }

        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            video_repo: required(self.video_repo, "video_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            subject_repo: required(self.subject_repo, "subject_repo")?,
            token_store: required(self.token_store, "token_store")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            password_service: PasswordService::new(),
            snowflake_generator: required(self.snowflake_generator, "snowflake_generator")?,
            reactions: self.reactions.unwrap_or_default(),
        })
    }
}
