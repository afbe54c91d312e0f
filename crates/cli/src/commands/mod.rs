//! CLI command implementations.

pub mod cart;
pub mod checkout;

use std::sync::Arc;

use techstore_cart::actions::{LogNavigator, LogNotifier};
use techstore_cart::config::CartConfig;
use techstore_cart::credentials::{CookieCredentials, CredentialProvider, StaticCredentials};
use techstore_cart::indicator::LogIndicator;
use techstore_cart::{CartActions, CartService, CartSynchronizer, FileStore, HttpCartService};

/// Collaborators shared by every command.
pub struct Context {
    pub cart: Arc<CartSynchronizer>,
    pub actions: CartActions,
}

impl Context {
    /// Wire the synchronizer and actions to the file store and the storefront API.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &CartConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let credentials: Arc<dyn CredentialProvider> = match &config.cookie {
            Some(cookie) => Arc::new(CookieCredentials::new(cookie.clone())),
            None => Arc::new(StaticCredentials::anonymous()),
        };

        let service: Arc<dyn CartService> = Arc::new(HttpCartService::new(
            config.api_url.clone(),
            credentials,
            config.request_timeout,
        )?);

        let cart = Arc::new(
            CartSynchronizer::new(Arc::new(FileStore::new(&config.cart_file)), service.clone())
                .with_key(config.cart_key.clone())
                .with_indicator(Arc::new(LogIndicator)),
        );

        let actions = CartActions::new(
            cart.clone(),
            service,
            Arc::new(LogNotifier),
            Arc::new(LogNavigator),
        )
        .with_settings(config.action_settings());

        tracing::debug!(api_url = %config.api_url, cart_file = %config.cart_file.display(), "Cart client ready");

        Ok(Self { cart, actions })
    }
}
