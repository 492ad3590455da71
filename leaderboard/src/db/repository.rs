//! Repository trait definitions for testability and dependency injection.
//!
//! This module provides trait-based abstractions over database operations,
//! enabling better testing through mock implementations and dependency
//! injection. Repositories return raw `sqlx::Error`; classifying a failure
//! (lookup vs. persistence) is the caller's job because the same database
//! error means different things depending on which step it interrupts.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::auth::{User, UserId};
use crate::scores::{ScoreId, ScoreRecord};

/// Trait for user repository operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, sqlx::Error>;
}

/// Trait for score repository operations
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Find the record currently flagged as the user's highscore
    async fn find_highscore(&self, user_id: UserId) -> Result<Option<ScoreRecord>, sqlx::Error>;

    /// Record a submission as a new, unflagged score row
    async fn create_score(&self, user_id: UserId, score: i64) -> Result<ScoreRecord, sqlx::Error>;

    /// Set or clear the highscore flag on one score row
    async fn set_highscore(&self, score_id: ScoreId, highscore: bool) -> Result<(), sqlx::Error>;
}

/// Default PostgreSQL implementation of `UserRepository`
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(
            "SELECT id, username, is_active, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            username: r.get("username"),
            is_active: r.get("is_active"),
            created_at: r.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        }))
    }
}

/// Default PostgreSQL implementation of `ScoreRepository`
pub struct PgScoreRepository {
    pool: PgPool,
}

impl PgScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreRepository for PgScoreRepository {
    async fn find_highscore(&self, user_id: UserId) -> Result<Option<ScoreRecord>, sqlx::Error> {
        // At most one row per user carries the flag. Ordering by score makes
        // the read pick the best row even if a crash once left two flagged.
        let row = sqlx::query(
            "SELECT id, user_id, score, highscore, created_at
             FROM scores WHERE user_id = $1 AND highscore
             ORDER BY score DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(map_score_row))
    }

    async fn create_score(&self, user_id: UserId, score: i64) -> Result<ScoreRecord, sqlx::Error> {
        let row = sqlx::query(
            "INSERT INTO scores (user_id, score, highscore) VALUES ($1, $2, FALSE)
             RETURNING id, user_id, score, highscore, created_at",
        )
        .bind(user_id)
        .bind(score)
        .fetch_one(&self.pool)
        .await?;

        Ok(map_score_row(row))
    }

    async fn set_highscore(&self, score_id: ScoreId, highscore: bool) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE scores SET highscore = $2 WHERE id = $1")
            .bind(score_id)
            .bind(highscore)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn map_score_row(row: sqlx::postgres::PgRow) -> ScoreRecord {
    ScoreRecord {
        id: row.get("id"),
        user_id: row.get("user_id"),
        score: row.get("score"),
        highscore: row.get("highscore"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
    }
}
