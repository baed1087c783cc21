//! Reaction service
//!
//! Runs the like/dislike ledger against a stored subject. Writes are
//! optimistic: a save that loses a race is retried from a fresh load.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, instrument, warn};
use vidshare_core::{
    DomainError, ReactionAction, ReactionLedger, ReactionOutcome, Snowflake, SubjectKind,
    SubjectRepository,
};

use crate::dto::SubjectReactionResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

const BACKOFF_STEP_MS: u64 = 5;
const BACKOFF_JITTER_MS: u64 = 10;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn like(
        &self,
        kind: SubjectKind,
        subject_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<SubjectReactionResponse> {
        self.react(kind, subject_id, user_id, ReactionAction::Like).await
    }

    pub async fn dislike(
        &self,
        kind: SubjectKind,
        subject_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<SubjectReactionResponse> {
        self.react(kind, subject_id, user_id, ReactionAction::Dislike)
            .await
    }

    #[instrument(skip(self), fields(kind = %kind, action = %action))]
    pub async fn react(
        &self,
        kind: SubjectKind,
        subject_id: Snowflake,
        user_id: Snowflake,
        action: ReactionAction,
    ) -> ServiceResult<SubjectReactionResponse> {
        let outcome = apply_with_retry(
            self.ctx.subject_repo(),
            kind,
            subject_id,
            user_id,
            action,
            self.ctx.reaction_attempts(),
        )
        .await?;

        info!(
            subject_id = %subject_id,
            user_id = %user_id,
            state = ?outcome.state(),
            like_count = outcome.like_count,
            dislike_count = outcome.dislike_count,
            "Reaction applied"
        );

        Ok(SubjectReactionResponse::new(subject_id, outcome))
    }
}

/// Load, apply, and save until the save wins or `max_attempts` runs out.
///
/// # Errors
/// `SubjectNotFound` when nothing of that kind has the ID, and
/// `ConcurrentModification` when every attempt lost a race.
pub async fn apply_with_retry(
    repo: &dyn SubjectRepository,
    kind: SubjectKind,
    subject_id: Snowflake,
    user_id: Snowflake,
    action: ReactionAction,
    max_attempts: u32,
) -> Result<ReactionOutcome, DomainError> {
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let mut subject = repo
            .load(kind, subject_id)
            .await?
            .ok_or(DomainError::SubjectNotFound {
                kind,
                id: subject_id,
            })?;

        let outcome = ReactionLedger::apply(&mut subject, user_id, action);

        match repo.save(&subject).await {
            Ok(()) => return Ok(outcome),
            Err(e) if e.is_retryable() && attempt < max_attempts => {
                debug!(attempt, "Reaction save lost a race, retrying");
                tokio::time::sleep(backoff(attempt)).await;
                attempt += 1;
            }
            Err(e) => {
                if e.is_retryable() {
                    warn!(attempts = attempt, "Reaction save kept conflicting");
                }
                return Err(e);
            }
        }
    }
}

fn backoff(attempt: u32) -> Duration {
    let jitter = rand::thread_rng().gen_range(0..=BACKOFF_JITTER_MS);
    Duration::from_millis(BACKOFF_STEP_MS * u64::from(attempt) + jitter)
}
