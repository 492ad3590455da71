//! Session status API handler.
//!
//! Clients keep a logged-in flag in local state as a cache of this check.
//! They refresh it here on load instead of trusting the cached value; the
//! server never trusts it at all.

use axum::{extract::Extension, response::Json};
use leaderboard::auth::User;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}

/// Report the session behind the request's cookie.
///
/// Reaching this handler already proves the session: the auth middleware
/// rejects anything unverifiable with `401` before it gets here.
///
/// # Response
///
/// ```json
/// {
///   "authenticated": true,
///   "user": { "id": 42, "username": "player1" }
/// }
/// ```
pub async fn session_status(Extension(user): Extension<User>) -> Json<SessionResponse> {
    Json(SessionResponse {
        authenticated: true,
        user: SessionUser {
            id: user.id,
            username: user.username,
        },
    })
}
