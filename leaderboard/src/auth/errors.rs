//! Authentication error types.

use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No session cookie on the request
    #[error("No session cookie present")]
    MissingSession,

    /// JWT token error (bad signature, malformed, expired)
    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    /// Token verified but the user no longer exists
    #[error("User not found")]
    UserNotFound,

    /// Account has been deactivated
    #[error("Account is deactivated")]
    AccountDisabled,
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database and JWT errors are sanitized to prevent information disclosure
    /// about the internal system structure.
    pub fn client_message(&self) -> String {
        match self {
            // Sanitize database errors - don't expose SQL details
            AuthError::Database(_) => "Internal server error".to_string(),
            // Sanitize JWT errors - don't expose token structure
            AuthError::JwtError(_) => "Authentication failed".to_string(),
            // All other errors are safe to expose
            _ => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
