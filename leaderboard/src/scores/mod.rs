//! Scores module providing submission recording and highscore reconciliation.
//!
//! This module implements:
//! - Append-only score history (one row per submission)
//! - A single `highscore` flag per user, kept on their best submission
//! - Promotion on strict improvement only (ties never promote)
//! - Per-user serialization of submissions against read-then-write races
//!
//! ## Example
//!
//! ```no_run
//! use leaderboard::db::{Database, PgScoreRepository};
//! use leaderboard::scores::ScoreManager;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let scores = ScoreManager::new(Arc::new(PgScoreRepository::new(db.pool().clone())));
//!
//!     let outcome = scores.submit_score(1, 420).await?;
//!     if outcome.improved {
//!         println!("new personal best: {}", outcome.new_highscore);
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{ScoreError, ScoreResult};
pub use manager::ScoreManager;
pub use models::{ScoreId, ScoreRecord, SubmissionOutcome};
