//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use leaderboard::db::DatabaseConfig;
use std::net::SocketAddr;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Prometheus exporter bind address, if metrics are enabled
    pub metrics_bind: Option<SocketAddr>,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Security configuration
    pub security: SecurityConfig,
}

/// Security-related configuration
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// HS256 secret the identity provider signs session tokens with (required)
    pub session_secret: String,
    /// Name of the cookie carrying the session token
    pub session_cookie: String,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `database_url_override` - Optional database URL override (from CLI args)
    ///
    /// # Returns
    ///
    /// * `Result<ServerConfig, ConfigError>` - Loaded configuration or error
    ///
    /// # Errors
    ///
    /// Returns error if required variables are missing or invalid
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        database_url_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        // Bind address
        let bind = bind_override
            .or_else(|| {
                std::env::var("SERVER_BIND")
                    .ok()
                    .and_then(|s| s.parse().ok())
            })
            .unwrap_or_else(|| {
                "127.0.0.1:3000"
                    .parse()
                    .expect("Default bind address is valid")
            });

        // Metrics exporter address (optional; unset disables the exporter)
        let metrics_bind = match std::env::var("METRICS_BIND") {
            Ok(value) => Some(value.parse().map_err(|_| ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: format!("Not a valid socket address: {value}"),
            })?),
            Err(_) => None,
        };

        // Database configuration
        let database_url = database_url_override
            .or_else(|| std::env::var("DATABASE_URL").ok())
            .unwrap_or_else(|| "postgres://postgres@localhost/leaderboard".to_string());

        let database = DatabaseConfig {
            database_url,
            max_connections: parse_env_or("DB_MAX_CONNECTIONS", 20),
            min_connections: parse_env_or("DB_MIN_CONNECTIONS", 2),
            connection_timeout_secs: parse_env_or("DB_CONNECTION_TIMEOUT_SECS", 5),
            idle_timeout_secs: parse_env_or("DB_IDLE_TIMEOUT_SECS", 300),
            max_lifetime_secs: parse_env_or("DB_MAX_LIFETIME_SECS", 1800),
        };

        // Security configuration (REQUIRED)
        let session_secret =
            std::env::var("SESSION_SECRET").map_err(|_| ConfigError::MissingRequired {
                var: "SESSION_SECRET".to_string(),
                hint: "Generate with: openssl rand -hex 32 (must match the identity provider)"
                    .to_string(),
            })?;

        if session_secret.len() < 32 {
            return Err(ConfigError::Invalid {
                var: "SESSION_SECRET".to_string(),
                reason: "Must be at least 32 characters (128-bit security)".to_string(),
            });
        }

        let session_cookie =
            std::env::var("SESSION_COOKIE").unwrap_or_else(|_| "session".to_string());

        let security = SecurityConfig {
            session_secret,
            session_cookie,
        };

        Ok(ServerConfig {
            bind,
            metrics_bind,
            database,
            security,
        })
    }

    /// Validate configuration after loading
    ///
    /// # Returns
    ///
    /// * `Result<(), ConfigError>` - Success or validation error
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate cookie name: it must survive round-tripping through a
        // Cookie header
        if self.security.session_cookie.is_empty() {
            return Err(ConfigError::Invalid {
                var: "SESSION_COOKIE".to_string(),
                reason: "Must not be empty".to_string(),
            });
        }

        if self
            .security
            .session_cookie
            .contains([';', '=', ' ', '\t'])
        {
            return Err(ConfigError::Invalid {
                var: "SESSION_COOKIE".to_string(),
                reason: "Must not contain ';', '=', or whitespace".to_string(),
            });
        }

        // Validate pool sizing
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "DB_MAX_CONNECTIONS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid {
                var: "DB_MIN_CONNECTIONS".to_string(),
                reason: format!(
                    "Cannot exceed max connections ({})",
                    self.database.max_connections
                ),
            });
        }

        // The exporter cannot share the API socket
        if self.metrics_bind == Some(self.bind) {
            return Err(ConfigError::Invalid {
                var: "METRICS_BIND".to_string(),
                reason: "Must differ from SERVER_BIND".to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {var}\nHint: {hint}")]
    MissingRequired { var: String, hint: String },

    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ServerConfig {
        ServerConfig {
            bind: "127.0.0.1:3000".parse().unwrap(),
            metrics_bind: None,
            database: DatabaseConfig {
                database_url: "postgres://localhost/test".to_string(),
                max_connections: 10,
                min_connections: 1,
                connection_timeout_secs: 5,
                idle_timeout_secs: 300,
                max_lifetime_secs: 1800,
            },
            security: SecurityConfig {
                session_secret: "a".repeat(32),
                session_cookie: "session".to_string(),
            },
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingRequired {
            var: "SESSION_SECRET".to_string(),
            hint: "Use openssl".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("SESSION_SECRET"));
        assert!(msg.contains("Use openssl"));
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_cookie_name() {
        let mut config = valid_config();
        config.security.session_cookie = String::new();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_config_validation_cookie_name_with_separator() {
        let mut config = valid_config();
        config.security.session_cookie = "ses=sion".to_string();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_config_validation_zero_max_connections() {
        let mut config = valid_config();
        config.database.max_connections = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_config_validation_min_exceeds_max_connections() {
        let mut config = valid_config();
        config.database.min_connections = 50;
        config.database.max_connections = 10;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_config_validation_metrics_on_api_socket() {
        let mut config = valid_config();
        config.metrics_bind = Some(config.bind);

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
