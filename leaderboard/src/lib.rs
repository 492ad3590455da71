//! # Leaderboard
//!
//! Session-gated score tracking with per-user highscore reconciliation.
//!
//! This library backs a small game-score service. Players submit scores over
//! HTTP; every submission is recorded as its own row, and exactly one row per
//! user carries the `highscore` flag marking their personal best. The library
//! owns the two server-side concerns:
//!
//! - **Auth gate**: turning a session cookie (an HS256 JWT minted by the
//!   identity provider) into a verified [`auth::User`]. Login, registration,
//!   and token issuance live elsewhere; this crate only validates.
//! - **Score reconciliation**: recording a submission and moving the
//!   `highscore` flag when the new score strictly beats the stored best.
//!
//! ## Core Modules
//!
//! - [`auth`]: session validation against the user backend
//! - [`scores`]: submission recording and highscore reconciliation
//! - [`db`]: connection pooling and repository traits over PostgreSQL
//!
//! ## Example
//!
//! ```no_run
//! use leaderboard::auth::AuthGate;
//! use leaderboard::db::{Database, PgScoreRepository, PgUserRepository};
//! use leaderboard::scores::ScoreManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!
//!     let gate = AuthGate::new(
//!         Arc::new(PgUserRepository::new(db.pool().clone())),
//!         "session_signing_secret".to_string(),
//!         "session".to_string(),
//!     );
//!     let scores = ScoreManager::new(Arc::new(PgScoreRepository::new(db.pool().clone())));
//!
//!     let user = gate.authenticate(Some("session=eyJhbGci...")).await?;
//!     let outcome = scores.submit_score(user.id, 420).await?;
//!     println!("personal best: {}", outcome.new_highscore);
//!     Ok(())
//! }
//! ```

/// Session-cookie validation against the user backend.
pub mod auth;
pub use auth::{AuthError, AuthGate, AuthResult, SessionClaims, User, UserId};

/// Connection pooling and repositories over PostgreSQL.
pub mod db;
pub use db::{Database, DatabaseConfig};

/// Score submission recording and highscore reconciliation.
pub mod scores;
pub use scores::{ScoreError, ScoreManager, ScoreResult, SubmissionOutcome};
