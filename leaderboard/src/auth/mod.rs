//! Authentication module providing session-cookie validation.
//!
//! This service never issues credentials. Players sign in through the
//! identity provider, which sets a session cookie containing an HS256 JWT.
//! The [`AuthGate`] here verifies that cookie on every protected request:
//! signature and expiry first, then a lookup against the user backend so a
//! deleted or deactivated account is rejected even while its token is still
//! within its lifetime.
//!
//! ## Example
//!
//! ```no_run
//! use leaderboard::auth::AuthGate;
//! use leaderboard::db::{Database, PgUserRepository};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let gate = AuthGate::new(
//!         Arc::new(PgUserRepository::new(db.pool().clone())),
//!         "session_signing_secret".to_string(),
//!         "session".to_string(),
//!     );
//!
//!     let user = gate.authenticate(Some("session=eyJhbGci...")).await?;
//!     println!("authenticated as {}", user.username);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod gate;
pub mod models;

pub use errors::{AuthError, AuthResult};
pub use gate::AuthGate;
pub use models::{SessionClaims, User, UserId};
