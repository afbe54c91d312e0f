//! Cart client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `TECHSTORE_API_URL` - Storefront base URL (default: http://127.0.0.1:8000)
//! - `TECHSTORE_CART_FILE` - Local cart store file (default: .techstore/cart.json)
//! - `TECHSTORE_CART_KEY` - Key of the cart in the local store (default: cart)
//! - `TECHSTORE_COOKIE` - Raw `Cookie` header with the session and `csrftoken` cookies
//! - `TECHSTORE_LOGIN_PATH` - Login page path (default: /login/)
//! - `TECHSTORE_REQUEST_TIMEOUT_SECS` - HTTP request timeout (default: 10)
//! - `TECHSTORE_CONTROL_FAILSAFE_MS` - Busy control failsafe (default: 4000)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::actions::{ActionSettings, DEFAULT_LOGIN_PATH};
use crate::control::DEFAULT_FAILSAFE;
use crate::sync::DEFAULT_STORAGE_KEY;

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_CART_FILE: &str = ".techstore/cart.json";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart client configuration.
#[derive(Clone)]
pub struct CartConfig {
    /// Storefront base URL
    pub api_url: Url,
    /// Local cart store file
    pub cart_file: PathBuf,
    /// Key of the cart in the local store
    pub cart_key: String,
    /// Raw `Cookie` header (session and CSRF cookies)
    pub cookie: Option<SecretString>,
    /// Login page path
    pub login_path: String,
    /// HTTP request timeout
    pub request_timeout: Duration,
    /// Busy control failsafe
    pub control_failsafe: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl std::fmt::Debug for CartConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartConfig")
            .field("api_url", &self.api_url.as_str())
            .field("cart_file", &self.cart_file)
            .field("cart_key", &self.cart_key)
            .field("cookie", &self.cookie.as_ref().map(|_| "[REDACTED]"))
            .field("login_path", &self.login_path)
            .field("request_timeout", &self.request_timeout)
            .field("control_failsafe", &self.control_failsafe)
            .field("sentry_dsn", &self.sentry_dsn)
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_url = Url::parse(&get_or("TECHSTORE_API_URL", DEFAULT_API_URL)).map_err(|e| {
            ConfigError::InvalidEnvVar("TECHSTORE_API_URL".to_string(), e.to_string())
        })?;

        let request_timeout = parse_u64(
            "TECHSTORE_REQUEST_TIMEOUT_SECS",
            lookup("TECHSTORE_REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )
        .map(Duration::from_secs)?;

        #[allow(clippy::cast_possible_truncation)] // Default failsafe is a few seconds
        let default_failsafe_ms = DEFAULT_FAILSAFE.as_millis() as u64;
        let control_failsafe = parse_u64(
            "TECHSTORE_CONTROL_FAILSAFE_MS",
            lookup("TECHSTORE_CONTROL_FAILSAFE_MS"),
            default_failsafe_ms,
        )
        .map(Duration::from_millis)?;

        Ok(Self {
            api_url,
            cart_file: PathBuf::from(get_or("TECHSTORE_CART_FILE", DEFAULT_CART_FILE)),
            cart_key: get_or("TECHSTORE_CART_KEY", DEFAULT_STORAGE_KEY),
            cookie: lookup("TECHSTORE_COOKIE")
                .filter(|value| !value.trim().is_empty())
                .map(SecretString::from),
            login_path: get_or("TECHSTORE_LOGIN_PATH", DEFAULT_LOGIN_PATH),
            request_timeout,
            control_failsafe,
            sentry_dsn: lookup("SENTRY_DSN").filter(|value| !value.is_empty()),
        })
    }

    /// Settings for [`CartActions`](crate::actions::CartActions).
    #[must_use]
    pub fn action_settings(&self) -> ActionSettings {
        ActionSettings {
            login_path: self.login_path.clone(),
            control_failsafe: self.control_failsafe,
        }
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset.
fn parse_u64(key: &str, value: Option<String>, default: u64) -> Result<u64, ConfigError> {
    value.map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
