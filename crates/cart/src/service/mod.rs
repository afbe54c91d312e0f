//! Server-side cart API.
//!
//! # Endpoints
//!
//! - `GET /api/cart/list/` - the authenticated user's cart
//! - `POST /api/cart/sync/` - replace the server cart with the local snapshot
//! - `POST /api/cart/add/` - add units of a product
//! - `POST /api/buy-now/` - start checkout for a single product
//! - `POST /api/cart/clear/` - acknowledge a logout
//!
//! [`HttpCartService`] talks to a real server. Tests substitute their own
//! [`CartService`] implementations.

mod http;
pub mod types;

pub use http::HttpCartService;
pub use types::{AddedToCart, BuyNowAccepted};

use async_trait::async_trait;
use techstore_core::{CartSnapshot, ProductId, Quantity};

use crate::error::ServiceError;

/// The server-side cart persistence and checkout API.
#[async_trait]
pub trait CartService: Send + Sync {
    /// Fetch the authenticated user's cart.
    async fn list(&self) -> Result<CartSnapshot, ServiceError>;

    /// Replace the server-side cart with `cart`.
    async fn sync(&self, cart: &CartSnapshot) -> Result<(), ServiceError>;

    /// Add `quantity` units of a product to the server-side cart.
    async fn add(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<AddedToCart, ServiceError>;

    /// Start an immediate purchase of a single product.
    async fn buy_now(
        &self,
        product_id: ProductId,
        quantity: Quantity,
    ) -> Result<BuyNowAccepted, ServiceError>;

    /// Tell the server the user logged out and the client cart was cleared.
    async fn clear(&self) -> Result<(), ServiceError>;
}
