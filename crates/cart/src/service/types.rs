//! Request and response bodies of the cart API.

use serde::{Deserialize, Serialize};
use techstore_core::{CartLine, CartSnapshot, ProductId, Quantity};

/// Body of `POST /api/cart/add/` and `POST /api/buy-now/`.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct ProductRequest {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

/// Body of `POST /api/cart/sync/`.
#[derive(Debug, Serialize)]
pub(crate) struct SyncRequest<'a> {
    pub cart: &'a CartSnapshot,
}

/// Response of `GET /api/cart/list/`.
///
/// The server also sends names, prices and subtotals; only the lines matter here.
#[derive(Debug, Deserialize)]
pub(crate) struct CartListResponse {
    #[serde(default)]
    pub items: Vec<CartLine>,
}

/// Body of a non-success response.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: Option<String>,
    #[serde(default)]
    pub requires_login: bool,
}

/// Successful response of `POST /api/cart/add/`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AddedToCart {
    pub message: Option<String>,
    /// Quantity of the product now in the server-side cart.
    pub quantity: Option<u32>,
    /// Line total as computed by the server.
    pub total: Option<f64>,
}

/// Successful response of `POST /api/buy-now/`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BuyNowAccepted {
    pub message: Option<String>,
    pub quantity: Option<u32>,
    pub total: Option<f64>,
    /// Where to send the user to complete checkout.
    pub redirect: Option<String>,
}
