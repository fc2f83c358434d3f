//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `RECIPE_BOX_HOST` - Bind address (default: 127.0.0.1)
//! - `RECIPE_BOX_PORT` - Listen port (default: 3000)
//! - `RECIPE_BOX_DATABASE_URL` - `PostgreSQL` connection string. Falls back to
//!   `DATABASE_URL`; when neither is set the server uses the in-memory store.
//! - `RECIPE_BOX_STATIC_DIR` - Directory with a rendered front-end, served at `/`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name (e.g., production)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// `PostgreSQL` connection URL (contains password); `None` selects the memory store
    pub database_url: Option<SecretString>,
    /// Rendered front-end directory served at `/`
    pub static_dir: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("RECIPE_BOX_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("RECIPE_BOX_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("RECIPE_BOX_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("RECIPE_BOX_PORT".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            database_url: get_database_url("RECIPE_BOX_DATABASE_URL"),
            static_dir: get_optional_env("RECIPE_BOX_STATIC_DIR").map(PathBuf::from),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get the database URL with fallback to generic `DATABASE_URL`.
///
/// # Errors
///
/// Returns `ConfigError::MissingEnvVar` when neither variable is set. Callers
/// that can run without a database use [`ServerConfig::from_env`] instead.
pub fn require_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    let _ = dotenvy::dotenv();
    get_database_url(primary_key).ok_or_else(|| ConfigError::MissingEnvVar(primary_key.to_string()))
}

fn get_database_url(primary_key: &str) -> Option<SecretString> {
    get_optional_env(primary_key)
        .or_else(|| get_optional_env("DATABASE_URL"))
        .map(SecretString::from)
}

/// Get an optional environment variable; empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}
