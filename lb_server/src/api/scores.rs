//! Score submission API handler.
//!
//! Records one row per submission and keeps the caller's `highscore` flag on
//! their best row. The response always reports the personal best after the
//! submission, so the client can display it without a second request.
//!
//! # Examples
//!
//! Submit a score:
//! ```bash
//! curl -X POST http://localhost:3000/save-score \
//!   -H "Content-Type: application/json" \
//!   -H "Cookie: session=eyJhbGciOiJIUzI1NiIs..." \
//!   -d '{"score": 420}'
//! ```

use axum::{
    Json,
    extract::{Extension, State},
    http::StatusCode,
};
use leaderboard::{auth::User, scores::ScoreError};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::metrics;

/// Localized user-facing bodies (game locale); internal logs stay English.
pub const ERR_HIGHSCORE_LOOKUP: &str = "Fehler beim Abrufen des Highscores";
pub const ERR_SERVER: &str = "Serverfehler";
pub const ERR_INVALID_SCORE: &str = "Ungültige Punktzahl";

#[derive(Debug, Deserialize)]
pub struct SaveScorePayload {
    pub score: i64,
}

#[derive(Debug, Serialize)]
pub struct SaveScoreResponse {
    pub success: bool,
    #[serde(rename = "newHighscore")]
    pub new_highscore: i64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Record a score submission and reconcile the caller's highscore.
///
/// Every submission is stored, improvement or not. The `highscore` flag
/// moves only when the new score strictly beats the stored best; a first
/// submission always becomes the best.
///
/// # Request Body
///
/// ```json
/// {
///   "score": 420
/// }
/// ```
///
/// # Response
///
/// On success, returns `200 OK` with the personal best after this
/// submission:
/// ```json
/// {
///   "success": true,
///   "newHighscore": 420
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Negative score
/// - `401 Unauthorized`: Missing or invalid session cookie (from middleware)
/// - `500 Internal Server Error`: Backend failure; the body distinguishes a
///   failed highscore lookup from other persistence errors
pub async fn save_score(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<SaveScorePayload>,
) -> Result<Json<SaveScoreResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.score_manager.submit_score(user.id, payload.score).await {
        Ok(outcome) => {
            metrics::score_submissions_total(outcome.improved);
            Ok(Json(SaveScoreResponse {
                success: true,
                new_highscore: outcome.new_highscore,
            }))
        }
        Err(err @ ScoreError::InvalidScore(_)) => {
            tracing::debug!(user_id = user.id, error = %err, "rejected score submission");
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: ERR_INVALID_SCORE.to_string(),
                }),
            ))
        }
        Err(err @ ScoreError::HighscoreLookup(_)) => {
            tracing::error!(user_id = user.id, error = %err, "highscore lookup failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: ERR_HIGHSCORE_LOOKUP.to_string(),
                }),
            ))
        }
        Err(err) => {
            tracing::error!(user_id = user.id, error = %err, "score submission failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: ERR_SERVER.to_string(),
                }),
            ))
        }
    }
}
