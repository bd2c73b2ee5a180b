//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `ECOPULS_API_BASE` - Backend base URL (default: `http://localhost:5000`)
//! - `ECOPULS_SESSION_FILE` - Path of the persisted session file
//!   (default: `.ecopuls-session.json` in the working directory)
//! - `ECOPULS_ADMIN_SECRET` - Shared secret forwarded on admin registration

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default backend base URL, matching the development server.
const DEFAULT_API_BASE: &str = "http://localhost:5000";

/// Default session file name.
const DEFAULT_SESSION_FILE: &str = ".ecopuls-session.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
///
/// Implements `Debug` manually to redact the admin secret.
#[derive(Clone)]
pub struct ApiConfig {
    /// Backend base URL (no trailing `/api`).
    pub base_url: Url,
    /// Where the session (token + profile) is persisted between runs.
    pub session_file: PathBuf,
    /// Shared secret granting admin registration, forwarded opaquely.
    pub admin_secret: Option<SecretString>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("session_file", &self.session_file)
            .field(
                "admin_secret",
                &self.admin_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `ECOPULS_API_BASE` is set but not a valid URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let base = get_env_or_default("ECOPULS_API_BASE", DEFAULT_API_BASE);
        let base_url = Url::parse(&base)
            .map_err(|e| ConfigError::InvalidEnvVar("ECOPULS_API_BASE".to_string(), e.to_string()))?;

        let session_file =
            PathBuf::from(get_env_or_default("ECOPULS_SESSION_FILE", DEFAULT_SESSION_FILE));

        let admin_secret = get_optional_env("ECOPULS_ADMIN_SECRET").map(SecretString::from);

        Ok(Self {
            base_url,
            session_file,
            admin_secret,
        })
    }

    /// Build a configuration pointing at an explicit base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `base` is not a valid URL.
    pub fn with_base_url(base: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base)
            .map_err(|e| ConfigError::InvalidEnvVar("base_url".to_string(), e.to_string()))?;
        Ok(Self {
            base_url,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            admin_secret: None,
        })
    }
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
