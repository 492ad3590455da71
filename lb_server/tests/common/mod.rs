//! Shared fixtures for HTTP integration tests.
//!
//! Provides in-memory repository implementations and session-token helpers
//! so the full router can be exercised without a database.

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use leaderboard::auth::{AuthGate, SessionClaims, User, UserId};
use leaderboard::db::{ScoreRepository, UserRepository};
use leaderboard::scores::{ScoreId, ScoreManager, ScoreRecord};
use lb_server::api::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const TEST_SECRET: &str = "integration_test_secret_0123456789abcdef";
pub const TEST_COOKIE: &str = "session";

/// In-memory user repository with failure injection
pub struct MemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
    fail_lookups: AtomicBool,
}

impl Default for MemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            fail_lookups: AtomicBool::new(false),
        }
    }

    pub fn with_user(self, user: User) -> Self {
        self.users.lock().unwrap().insert(user.id, user);
        self
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, sqlx::Error> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        Ok(self.users.lock().unwrap().get(&user_id).cloned())
    }
}

/// In-memory score repository with failure injection
pub struct MemoryScoreRepository {
    records: Mutex<Vec<ScoreRecord>>,
    next_id: Mutex<ScoreId>,
    fail_lookups: AtomicBool,
    fail_creates: AtomicBool,
    fail_updates: AtomicBool,
}

impl Default for MemoryScoreRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScoreRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            next_id: Mutex::new(1),
            fail_lookups: AtomicBool::new(false),
            fail_creates: AtomicBool::new(false),
            fail_updates: AtomicBool::new(false),
        }
    }

    /// Snapshot of all stored records
    pub fn records(&self) -> Vec<ScoreRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn fail_creates(&self, fail: bool) {
        self.fail_creates.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

fn simulated_failure() -> sqlx::Error {
    sqlx::Error::Protocol("simulated backend failure".to_string())
}

#[async_trait]
impl ScoreRepository for MemoryScoreRepository {
    async fn find_highscore(&self, user_id: UserId) -> Result<Option<ScoreRecord>, sqlx::Error> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| r.user_id == user_id && r.highscore)
            .max_by_key(|r| r.score)
            .cloned())
    }

    async fn create_score(&self, user_id: UserId, score: i64) -> Result<ScoreRecord, sqlx::Error> {
        if self.fail_creates.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        let mut next_id = self.next_id.lock().unwrap();
        let id = *next_id;
        *next_id += 1;

        let record = ScoreRecord {
            id,
            user_id,
            score,
            highscore: false,
            created_at: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn set_highscore(&self, score_id: ScoreId, highscore: bool) -> Result<(), sqlx::Error> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == score_id) {
            record.highscore = highscore;
        }
        Ok(())
    }
}

/// Build a user record for tests
pub fn test_user(id: UserId, username: &str) -> User {
    User {
        id,
        username: username.to_string(),
        is_active: true,
        created_at: Utc::now(),
    }
}

/// Mint a session cookie value for a user, signed with the test secret
pub fn session_cookie_for(user: &User) -> String {
    session_cookie_with_expiry(user, 900)
}

/// Mint a session cookie with a chosen expiry offset in seconds
pub fn session_cookie_with_expiry(user: &User, expires_in: i64) -> String {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user.id,
        username: user.username.clone(),
        exp: now + expires_in,
        iat: now,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("Failed to sign test token");

    format!("{TEST_COOKIE}={token}")
}

/// Assemble application state over in-memory repositories
pub fn build_state(
    users: Arc<MemoryUserRepository>,
    scores: Arc<MemoryScoreRepository>,
) -> AppState {
    AppState {
        auth_gate: Arc::new(AuthGate::new(
            users,
            TEST_SECRET.to_string(),
            TEST_COOKIE.to_string(),
        )),
        score_manager: Arc::new(ScoreManager::new(scores)),
    }
}
