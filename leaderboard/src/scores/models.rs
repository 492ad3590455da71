//! Score data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::UserId;

/// Score record ID type
pub type ScoreId = i64;

/// A single submitted score
///
/// History is append-only: every submission becomes its own row. At most one
/// row per user carries `highscore = true`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: ScoreId,
    pub user_id: UserId,
    pub score: i64,
    pub highscore: bool,
    pub created_at: DateTime<Utc>,
}

/// Result of reconciling a submission against the stored highscore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// The user's personal best after this submission
    pub new_highscore: i64,
    /// Whether this submission became the new personal best
    pub improved: bool,
}
