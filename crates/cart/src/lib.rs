//! TechStore cart synchronization library.
//!
//! Keeps a client-local cart in step with the storefront's server-side cart,
//! and wraps the "add to cart" and "buy now" requests with user feedback.
//!
//! # Architecture
//!
//! - [`sync::CartSynchronizer`] owns the local cart and reconciles it with the server
//! - [`store::LocalStore`] persists the local cart (file or memory)
//! - [`service::CartService`] is the server API (`reqwest` over HTTP)
//! - [`credentials::CredentialProvider`] supplies the session cookie and CSRF token
//! - [`actions::CartActions`] turns server outcomes into notifications and redirects
//!
//! Every collaborator is injected at construction, so any of them can be
//! replaced by a fake.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod actions;
pub mod config;
pub mod control;
pub mod credentials;
pub mod error;
pub mod indicator;
pub mod service;
pub mod store;
pub mod sync;

#[cfg(test)]
mod testing;

pub use actions::{CartActions, Navigator, Notification, NotificationKind, Notifier, Redirect};
pub use error::{ServiceError, StoreError};
pub use service::{CartService, HttpCartService};
pub use store::{FileStore, LocalStore, MemoryStore};
pub use sync::CartSynchronizer;
