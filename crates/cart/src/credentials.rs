//! Request credentials for the cart API.
//!
//! The storefront authenticates state-changing requests with the session
//! cookie plus a CSRF token echoed in the `X-CSRFToken` header. Both come from
//! a [`CredentialProvider`] handed to the HTTP service at construction.

use secrecy::{ExposeSecret, SecretString};

/// Name of the cookie holding the CSRF token.
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Supplies credentials for each outgoing request.
pub trait CredentialProvider: Send + Sync {
    /// Token for the `X-CSRFToken` header.
    fn csrf_token(&self) -> Option<SecretString>;

    /// Value for the `Cookie` header.
    fn cookie_header(&self) -> Option<SecretString> {
        None
    }
}

/// Fixed credentials, or none at all for a guest.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    csrf_token: Option<SecretString>,
}

impl StaticCredentials {
    /// Credentials for a guest: no token.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_csrf_token(token: impl Into<String>) -> Self {
        Self {
            csrf_token: Some(SecretString::from(token.into())),
        }
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("csrf_token", &self.csrf_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl CredentialProvider for StaticCredentials {
    fn csrf_token(&self) -> Option<SecretString> {
        self.csrf_token.clone()
    }
}

/// Credentials taken from a raw `Cookie` header (`name=value; name=value`).
///
/// The whole header is forwarded as-is and the CSRF token is read from the
/// `csrftoken` cookie.
#[derive(Clone)]
pub struct CookieCredentials {
    header: SecretString,
}

impl CookieCredentials {
    #[must_use]
    pub const fn new(header: SecretString) -> Self {
        Self { header }
    }
}

impl std::fmt::Debug for CookieCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieCredentials")
            .field("header", &"[REDACTED]")
            .finish()
    }
}

impl CredentialProvider for CookieCredentials {
    fn csrf_token(&self) -> Option<SecretString> {
        cookie_value(self.header.expose_secret(), CSRF_COOKIE_NAME).map(SecretString::from)
    }

    fn cookie_header(&self) -> Option<SecretString> {
        if self.header.expose_secret().trim().is_empty() {
            None
        } else {
            Some(self.header.clone())
        }
    }
}

/// Find a cookie in a `Cookie` header and percent-decode its value.
///
/// Returns `None` if the cookie is absent. A value that does not decode as
/// UTF-8 is returned undecoded.
#[must_use]
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| {
            urlencoding::decode(raw).map_or_else(|_| raw.to_string(), std::borrow::Cow::into_owned)
        })
}
