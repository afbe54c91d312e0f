//! Error types for the cart synchronizer and its collaborators.
//!
//! Network errors never escape the synchronizer or the cart actions: they are
//! swallowed during reconciliation and turned into notifications by
//! [`CartActions`](crate::actions::CartActions). Store errors are the only
//! failures returned from cart mutations.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by a [`CartService`](crate::service::CartService).
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    /// The server answered 401: the user must log in first.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// The server answered with a non-success status.
    #[error("Server rejected request: {status} - {}", .message.as_deref().unwrap_or("(no message)"))]
    ServerRejected {
        status: StatusCode,
        /// The `error` field of the response body, if any.
        message: Option<String>,
        /// The server asked the client to log in without answering 401.
        requires_login: bool,
    },

    /// The request did not complete, or its response could not be read.
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),
}

impl ServiceError {
    /// Whether this error means the user has to log in.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        match self {
            Self::Unauthenticated => true,
            Self::ServerRejected { requires_login, .. } => *requires_login,
            Self::NetworkUnavailable(_) => false,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self::NetworkUnavailable(err.to_string())
    }
}

/// Errors returned by a [`LocalStore`](crate::store::LocalStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but is not a valid store.
    #[error("Store file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// A previous writer panicked while holding the store lock.
    #[error("Store lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let err = ServiceError::ServerRejected {
            status: StatusCode::BAD_REQUEST,
            message: Some("Insufficient stock".to_string()),
            requires_login: false,
        };
        assert_eq!(
            err.to_string(),
            "Server rejected request: 400 Bad Request - Insufficient stock"
        );

        let err = ServiceError::ServerRejected {
            status: StatusCode::NOT_FOUND,
            message: None,
            requires_login: false,
        };
        assert_eq!(
            err.to_string(),
            "Server rejected request: 404 Not Found - (no message)"
        );
    }

    #[test]
    fn test_requires_login() {
        assert!(ServiceError::Unauthenticated.requires_login());
        assert!(
            ServiceError::ServerRejected {
                status: StatusCode::FORBIDDEN,
                message: None,
                requires_login: true,
            }
            .requires_login()
        );
        assert!(!ServiceError::NetworkUnavailable("refused".to_string()).requires_login());
    }

    #[test]
    fn test_store_error_display() {
        assert_eq!(StoreError::Poisoned.to_string(), "Store lock poisoned");
    }
}
