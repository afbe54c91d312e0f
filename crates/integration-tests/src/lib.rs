//! Integration tests for TechStore cart sync.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p techstore-integration-tests
//! ```
//!
//! The tests run the real HTTP service and file store against a `mockito`
//! server standing in for the storefront API. No running storefront is needed.
//!
//! # Test Categories
//!
//! - `cart_sync` - Reconciliation between the file store and the server cart
//! - `cart_actions` - "Add to cart" / "buy now" outcomes

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use secrecy::SecretString;
use techstore_cart::actions::{Navigator, Notification, Notifier, Redirect};
use techstore_cart::credentials::{CookieCredentials, CredentialProvider, StaticCredentials};
use techstore_cart::{CartActions, CartSynchronizer, FileStore, HttpCartService};
use url::Url;

/// Records notifications for assertions.
#[derive(Default)]
pub struct RecordingNotifier(Mutex<Vec<Notification>>);

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.0.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.0.lock().unwrap().push(notification.clone());
    }
}

/// Records navigations for assertions.
#[derive(Default)]
pub struct RecordingNavigator(Mutex<Vec<Redirect>>);

impl RecordingNavigator {
    pub fn redirects(&self) -> Vec<Redirect> {
        self.0.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, redirect: &Redirect) {
        self.0.lock().unwrap().push(redirect.clone());
    }
}

/// A synchronizer and actions wired to a mock storefront and a temporary file store.
pub struct TestContext {
    pub cart: Arc<CartSynchronizer>,
    pub actions: CartActions,
    pub store: Arc<FileStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<RecordingNavigator>,
    _dir: tempfile::TempDir,
}

impl TestContext {
    /// A guest session: no cookies, no CSRF token.
    pub fn guest(base_url: &str) -> Self {
        Self::with_credentials(base_url, Arc::new(StaticCredentials::anonymous()))
    }

    /// A logged-in session carrying `cookie` as its `Cookie` header.
    pub fn logged_in(base_url: &str, cookie: &str) -> Self {
        Self::with_credentials(
            base_url,
            Arc::new(CookieCredentials::new(SecretString::from(cookie.to_string()))),
        )
    }

    fn with_credentials(base_url: &str, credentials: Arc<dyn CredentialProvider>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FileStore::new(dir.path().join("cart.json")));

        let service = Arc::new(
            HttpCartService::new(
                Url::parse(base_url).unwrap(),
                credentials,
                Duration::from_secs(5),
            )
            .unwrap(),
        );

        let cart = Arc::new(CartSynchronizer::new(store.clone(), service.clone()));
        let notifier = Arc::new(RecordingNotifier::default());
        let navigator = Arc::new(RecordingNavigator::default());
        let actions = CartActions::new(cart.clone(), service, notifier.clone(), navigator.clone());

        Self {
            cart,
            actions,
            store,
            notifier,
            navigator,
            _dir: dir,
        }
    }
}
