//! Score submission error types.

use thiserror::Error;

/// Score submission errors
///
/// The two database variants are split by which step the failure interrupts,
/// not by what the backend reported: a lookup failure aborts before anything
/// is written, a persistence failure can leave a recorded-but-unflagged row
/// behind.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Score failed validation (must be non-negative)
    #[error("Invalid score: {0}")]
    InvalidScore(i64),

    /// Backend error while fetching the prior highscore
    #[error("Highscore lookup failed: {0}")]
    HighscoreLookup(#[source] sqlx::Error),

    /// Backend error while recording the submission or moving the flag
    #[error("Score persistence failed: {0}")]
    Persistence(#[source] sqlx::Error),
}

/// Result type for score operations
pub type ScoreResult<T> = Result<T, ScoreError>;
