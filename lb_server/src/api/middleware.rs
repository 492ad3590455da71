//! Session-cookie authentication middleware for protected endpoints.
//!
//! The middleware hands the raw `Cookie` header to the auth gate, which
//! verifies the session token and resolves the live user record. On success
//! the [`leaderboard::auth::User`] is injected into request extensions for
//! downstream handlers.
//!
//! # Extracting the user
//!
//! In handler functions, extract the authenticated user from request
//! extensions:
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use leaderboard::auth::User;
//!
//! async fn protected_handler(Extension(user): Extension<User>) -> String {
//!     format!("Authenticated as {}", user.username)
//! }
//! # let _ = protected_handler;
//! ```

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header::COOKIE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use leaderboard::auth::AuthError;

use super::AppState;
use super::scores::{ERR_SERVER, ErrorResponse};
use crate::metrics;

/// Localized prefix for the 401 body. The game frontend surfaces this text
/// to the player verbatim.
pub const NOT_SIGNED_IN: &str = "Du scheinst nicht angemeldet zu sein.";

/// Authentication middleware that validates session cookies and injects the
/// authenticated user.
///
/// # Behavior
///
/// - **Success**: Session valid → injects [`leaderboard::auth::User`] into
///   request extensions → calls next handler
/// - **Cookie missing, token bad, account gone or disabled**: Returns
///   `401 Unauthorized` with a localized plain text body; the sanitized
///   detail is appended after the localized prefix.
/// - **User backend unreachable**: Not an authentication verdict at all,
///   so it surfaces as `500` with the generic error body rather than
///   telling the player they are signed out.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let cookie_header = request
        .headers()
        .get(COOKIE)
        .and_then(|value| value.to_str().ok());

    match state.auth_gate.authenticate(cookie_header).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        Err(err @ AuthError::Database(_)) => {
            metrics::auth_failures_total(failure_reason(&err));
            tracing::error!(error = %err, "user backend failed during session check");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: ERR_SERVER.to_string(),
                }),
            )
                .into_response())
        }
        Err(err) => {
            metrics::auth_failures_total(failure_reason(&err));
            tracing::debug!(error = %err, "rejected unauthenticated request");
            Err((
                StatusCode::UNAUTHORIZED,
                format!("{NOT_SIGNED_IN} {}", err.client_message()),
            )
                .into_response())
        }
    }
}

/// Stable label for the rejection counter
fn failure_reason(err: &AuthError) -> &'static str {
    match err {
        AuthError::MissingSession => "missing_session",
        AuthError::JwtError(_) => "invalid_token",
        AuthError::UserNotFound => "unknown_user",
        AuthError::AccountDisabled => "disabled_account",
        AuthError::Database(_) => "backend_error",
    }
}
