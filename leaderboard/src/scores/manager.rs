//! Score manager implementation.

use super::{
    errors::{ScoreError, ScoreResult},
    models::SubmissionOutcome,
};
use crate::auth::UserId;
use crate::db::ScoreRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Score manager
///
/// Records every submission and keeps each user's `highscore` flag on their
/// best row. Submissions for the same user are serialized through an
/// in-process lock so two concurrent requests cannot both read a stale best
/// and double-flag. This assumes a single server process; see the repository
/// docs for the multi-instance caveat.
#[derive(Clone)]
pub struct ScoreManager {
    scores: Arc<dyn ScoreRepository>,
    /// One lock per user who has submitted since startup; entries are never
    /// pruned.
    submission_locks: Arc<RwLock<HashMap<UserId, Arc<Mutex<()>>>>>,
}

impl ScoreManager {
    /// Create a new score manager
    ///
    /// # Arguments
    ///
    /// * `scores` - Score repository backing submissions and flag updates
    ///
    /// # Returns
    ///
    /// * `ScoreManager` - New score manager instance
    pub fn new(scores: Arc<dyn ScoreRepository>) -> Self {
        Self {
            scores,
            submission_locks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Record a submitted score and reconcile the user's highscore flag.
    ///
    /// Steps, in order:
    /// 1. Reject negative scores before touching the backend.
    /// 2. Fetch the row currently flagged as the user's best. A missing row
    ///    is the first-time-submitter case, not an error.
    /// 3. Record the submission as a new, unflagged row. Every submission is
    ///    kept, improvement or not.
    /// 4. If there was no prior best, or the new score is strictly greater,
    ///    clear the old flag and set it on the new row. Ties keep the
    ///    earlier row flagged.
    ///
    /// The flag move is two single-row updates, not a transaction. A crash
    /// between them can strand the flag; the next improving submission
    /// repairs it, and reads prefer the best flagged row meanwhile.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Authenticated user the score belongs to
    /// * `score` - Submitted score, must be non-negative
    ///
    /// # Returns
    ///
    /// * `ScoreResult<SubmissionOutcome>` - Personal best after this
    ///   submission, and whether it improved
    pub async fn submit_score(&self, user_id: UserId, score: i64) -> ScoreResult<SubmissionOutcome> {
        if score < 0 {
            return Err(ScoreError::InvalidScore(score));
        }

        let user_lock = self.submission_lock(user_id).await;
        let _guard = user_lock.lock().await;

        let prior = self
            .scores
            .find_highscore(user_id)
            .await
            .map_err(ScoreError::HighscoreLookup)?;

        let entry = self
            .scores
            .create_score(user_id, score)
            .await
            .map_err(ScoreError::Persistence)?;

        let improved = prior.as_ref().map_or(true, |best| score > best.score);

        if improved {
            if let Some(ref best) = prior {
                self.scores
                    .set_highscore(best.id, false)
                    .await
                    .map_err(ScoreError::Persistence)?;
            }
            self.scores
                .set_highscore(entry.id, true)
                .await
                .map_err(ScoreError::Persistence)?;

            tracing::info!(user_id, score, "new personal highscore");
        }

        let new_highscore = prior.map_or(score, |best| best.score.max(score));

        Ok(SubmissionOutcome {
            new_highscore,
            improved,
        })
    }

    /// Get or create the lock serializing one user's submissions
    async fn submission_lock(&self, user_id: UserId) -> Arc<Mutex<()>> {
        if let Some(lock) = self.submission_locks.read().await.get(&user_id) {
            return lock.clone();
        }

        let mut locks = self.submission_locks.write().await;
        locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
