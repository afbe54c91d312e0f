//! Local cart state and its reconciliation with the server cart.
//!
//! # Reconciliation
//!
//! The local snapshot and the server snapshot may diverge. Every mutation
//! ends with [`CartSynchronizer::update_count`], which reconciles in one
//! direction only:
//!
//! - local cart empty: pull the server cart (if any) into the local store
//! - local cart nonempty: push the local cart to the server, which replaces
//!   its copy (local wins, quantities are never merged across sources)
//!
//! Server failures during reconciliation are expected for guests and are
//! swallowed. Afterwards every registered [`CountIndicator`] shows the total.

use std::sync::Arc;

use techstore_core::{CartSnapshot, ProductId, Quantity};
use tracing::{debug, info, instrument, warn};

use crate::error::StoreError;
use crate::indicator::CountIndicator;
use crate::service::CartService;
use crate::store::LocalStore;

/// Key under which the cart snapshot is stored.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Owns the local cart and keeps it in step with the server.
pub struct CartSynchronizer {
    store: Arc<dyn LocalStore>,
    service: Arc<dyn CartService>,
    key: String,
    indicators: Vec<Arc<dyn CountIndicator>>,
}

impl CartSynchronizer {
    /// Create a synchronizer storing the cart under [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(store: Arc<dyn LocalStore>, service: Arc<dyn CartService>) -> Self {
        Self {
            store,
            service,
            key: DEFAULT_STORAGE_KEY.to_string(),
            indicators: Vec::new(),
        }
    }

    /// Store the cart under a different key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Register an indicator to refresh after every reconciliation.
    #[must_use]
    pub fn with_indicator(mut self, indicator: Arc<dyn CountIndicator>) -> Self {
        self.indicators.push(indicator);
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the local cart.
    ///
    /// A missing, unreadable or malformed value reads as an empty cart.
    #[must_use]
    pub fn get(&self) -> CartSnapshot {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CartSnapshot::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read local cart, treating as empty");
                return CartSnapshot::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Malformed local cart, treating as empty");
            CartSnapshot::new()
        })
    }

    /// Add units of a product and reconcile.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store cannot be written.
    #[instrument(skip(self), fields(product_id = %product_id, quantity = %quantity))]
    pub async fn add(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<CartSnapshot, StoreError> {
        let mut cart = self.get();
        cart.add(product_id, quantity);
        self.persist(&cart)?;
        info!(total = cart.total_quantity(), "Added to local cart");

        self.update_count().await;
        Ok(cart)
    }

    /// Remove a product's line and reconcile.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store cannot be written.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove(&self, product_id: ProductId) -> Result<CartSnapshot, StoreError> {
        let mut cart = self.get();
        cart.remove(product_id);
        self.persist(&cart)?;
        info!(total = cart.total_quantity(), "Removed from local cart");

        self.update_count().await;
        Ok(cart)
    }

    /// Set a product's quantity exactly (zero removes it) and reconcile.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store cannot be written.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn set_quantity(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartSnapshot, StoreError> {
        let mut cart = self.get();
        cart.set_quantity(product_id, quantity);
        self.persist(&cart)?;
        info!(total = cart.total_quantity(), "Updated local cart quantity");

        self.update_count().await;
        Ok(cart)
    }

    /// Delete the local cart and reconcile.
    ///
    /// Reconciling an empty cart pulls the server cart back in, so for a
    /// logged-in user this restores their saved cart. Use
    /// [`logout`](Self::logout) to drop the cart for good.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store cannot be written.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.remove_item(&self.key)?;
        info!("Cleared local cart");

        self.update_count().await;
        Ok(())
    }

    /// Drop the local cart when the user logs out.
    ///
    /// The server is told about the logout, but its cart is not pulled back.
    ///
    /// # Errors
    ///
    /// Returns an error if the local store cannot be written.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), StoreError> {
        self.store.remove_item(&self.key)?;

        if let Err(e) = self.service.clear().await {
            debug!(error = %e, "Server cart clear failed");
        }

        info!("Cleared local cart on logout");
        self.render(0);
        Ok(())
    }

    /// Reconcile the local cart with the server and refresh the indicators.
    ///
    /// Returns the final total quantity.
    #[instrument(skip(self))]
    pub async fn update_count(&self) -> u64 {
        let cart = self.get();
        let mut count = cart.total_quantity();

        if count == 0 {
            match self.service.list().await {
                Ok(server) if !server.is_empty() => {
                    if let Err(e) = self.persist(&server) {
                        warn!(error = %e, "Failed to store server cart locally");
                    }
                    count = server.total_quantity();
                    info!(count, lines = server.len(), "Pulled server cart");
                }
                Ok(_) => debug!("Server cart is empty"),
                // Guests have no server cart
                Err(e) => debug!(error = %e, "Server cart unavailable"),
            }
        } else if let Err(e) = self.service.sync(&cart).await {
            // Not logged in yet; the push is repeated on the next mutation
            debug!(error = %e, "Cart sync failed");
        }

        self.render(count);
        count
    }

    /// Total quantity of the local cart, without touching the server.
    #[must_use]
    pub fn get_count(&self) -> u64 {
        self.get().total_quantity()
    }

    fn persist(&self, cart: &CartSnapshot) -> Result<(), StoreError> {
        let raw = serde_json::to_string(cart)?;
        self.store.set_item(&self.key, &raw)
    }

    fn render(&self, count: u64) {
        for indicator in &self.indicators {
            indicator.update(count, count > 0);
        }
    }
}

impl std::fmt::Debug for CartSynchronizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartSynchronizer")
            .field("key", &self.key)
            .field("indicators", &self.indicators.len())
            .finish_non_exhaustive()
    }
}
