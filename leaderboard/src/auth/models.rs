//! Authentication data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User ID type
pub type UserId = i64;

/// User model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// JWT claims carried by the session cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: UserId,           // User ID
    pub username: String,
    pub exp: i64,              // Expiration timestamp
    pub iat: i64,              // Issued at timestamp
}
