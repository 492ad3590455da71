//! Auth gate implementation.

use super::{
    errors::{AuthError, AuthResult},
    models::{SessionClaims, User},
};
use crate::db::UserRepository;
use jsonwebtoken::{decode, DecodingKey, Validation};
use std::sync::Arc;

/// Auth gate
///
/// Validates the session cookie set by the identity provider and resolves it
/// to a live user record. Token issuance (login, registration, refresh) is
/// out of scope; a request either carries a verifiable session or it is
/// rejected.
#[derive(Clone)]
pub struct AuthGate {
    users: Arc<dyn UserRepository>,
    session_secret: String,
    cookie_name: String,
}

impl AuthGate {
    /// Create a new auth gate
    ///
    /// # Arguments
    ///
    /// * `users` - User repository backing identity lookups
    /// * `session_secret` - HS256 secret the identity provider signs session tokens with
    /// * `cookie_name` - Name of the cookie carrying the session token
    pub fn new(users: Arc<dyn UserRepository>, session_secret: String, cookie_name: String) -> Self {
        Self {
            users,
            session_secret,
            cookie_name,
        }
    }

    /// Authenticate a request from its `Cookie` header.
    ///
    /// Verification order: cookie present, token signature and expiry valid,
    /// user exists, account active. The user lookup is deliberate even though
    /// the token already names the user: tokens outlive account deletion and
    /// deactivation, the backend is authoritative.
    ///
    /// # Arguments
    ///
    /// * `cookie_header` - Raw `Cookie` header value, if the request had one
    ///
    /// # Returns
    ///
    /// * `AuthResult<User>` - The authenticated user or the rejection reason
    pub async fn authenticate(&self, cookie_header: Option<&str>) -> AuthResult<User> {
        let token = cookie_header
            .and_then(|header| find_cookie(header, &self.cookie_name))
            .ok_or(AuthError::MissingSession)?;

        let claims = self.verify_session_token(token)?;

        let user = self
            .users
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !user.is_active {
            tracing::debug!(user_id = user.id, "deactivated account presented a valid session");
            return Err(AuthError::AccountDisabled);
        }

        Ok(user)
    }

    /// Verify a session token and return its claims
    ///
    /// # Arguments
    ///
    /// * `token` - JWT string taken from the session cookie
    ///
    /// # Returns
    ///
    /// * `AuthResult<SessionClaims>` - Decoded claims or error
    pub fn verify_session_token(&self, token: &str) -> AuthResult<SessionClaims> {
        let token_data = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.session_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// Pull one cookie value out of a `Cookie` header.
///
/// Pairs are `name=value` separated by `";"`. The value is returned as-is;
/// session tokens are base64url and need no unescaping.
fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::mock::MockUserRepository;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test_session_secret";
    const COOKIE: &str = "session";

    fn sample_user(id: i64) -> User {
        User {
            id,
            username: format!("player{id}"),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn mint_token(secret: &str, user: &User, expires_in: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.id,
            username: user.username.clone(),
            exp: now + expires_in,
            iat: now,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn gate_with(repo: MockUserRepository) -> AuthGate {
        AuthGate::new(Arc::new(repo), SECRET.to_string(), COOKIE.to_string())
    }

    #[test]
    fn find_cookie_picks_the_named_pair() {
        let header = "theme=dark; session=abc.def.ghi; lang=de";
        assert_eq!(find_cookie(header, "session"), Some("abc.def.ghi"));
        assert_eq!(find_cookie(header, "theme"), Some("dark"));
        assert_eq!(find_cookie(header, "missing"), None);
    }

    #[test]
    fn find_cookie_keeps_equals_signs_in_values() {
        assert_eq!(find_cookie("session=a=b", "session"), Some("a=b"));
    }

    #[test]
    fn find_cookie_ignores_name_suffix_matches() {
        assert_eq!(find_cookie("xsession=evil", "session"), None);
    }

    #[tokio::test]
    async fn missing_cookie_header_is_rejected() {
        let gate = gate_with(MockUserRepository::new());

        let err = gate.authenticate(None).await.unwrap_err();
        assert!(matches!(err, AuthError::MissingSession));
    }

    #[tokio::test]
    async fn header_without_session_cookie_is_rejected() {
        let gate = gate_with(MockUserRepository::new());

        let err = gate
            .authenticate(Some("theme=dark; lang=de"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::MissingSession));
    }

    #[tokio::test]
    async fn valid_session_authenticates() {
        let user = sample_user(7);
        let token = mint_token(SECRET, &user, 900);
        let gate = gate_with(MockUserRepository::new().with_user(user));

        let authenticated = gate
            .authenticate(Some(&format!("theme=dark; session={token}")))
            .await
            .unwrap();
        assert_eq!(authenticated.id, 7);
        assert_eq!(authenticated.username, "player7");
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let user = sample_user(7);
        let token = mint_token("some_other_secret", &user, 900);
        let gate = gate_with(MockUserRepository::new().with_user(user));

        let err = gate
            .authenticate(Some(&format!("session={token}")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::JwtError(_)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let user = sample_user(7);
        // Well past the default validation leeway.
        let token = mint_token(SECRET, &user, -7200);
        let gate = gate_with(MockUserRepository::new().with_user(user));

        let err = gate
            .authenticate(Some(&format!("session={token}")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::JwtError(_)));
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let gate = gate_with(MockUserRepository::new());

        let err = gate
            .authenticate(Some("session=not-a-jwt"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::JwtError(_)));
    }

    #[tokio::test]
    async fn token_for_deleted_user_is_rejected() {
        let user = sample_user(7);
        let token = mint_token(SECRET, &user, 900);
        let gate = gate_with(MockUserRepository::new());

        let err = gate
            .authenticate(Some(&format!("session={token}")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
    }

    #[tokio::test]
    async fn deactivated_account_is_rejected() {
        let mut user = sample_user(7);
        user.is_active = false;
        let token = mint_token(SECRET, &user, 900);
        let gate = gate_with(MockUserRepository::new().with_user(user));

        let err = gate
            .authenticate(Some(&format!("session={token}")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::AccountDisabled));
    }

    #[tokio::test]
    async fn backend_failure_surfaces_as_database_error() {
        let user = sample_user(7);
        let token = mint_token(SECRET, &user, 900);
        let repo = MockUserRepository::new().with_user(user);
        repo.fail_lookups(true);
        let gate = gate_with(repo);

        let err = gate
            .authenticate(Some(&format!("session={token}")))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Database(_)));
    }
}
