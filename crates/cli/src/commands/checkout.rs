//! Server-backed cart actions.

use techstore_cart::control::Control;
use techstore_core::{ProductId, Quantity};
use tracing::{debug, info};

use super::Context;

/// Reports busy-state changes of the command through `tracing`.
struct LogControl;

impl Control for LogControl {
    fn set_busy(&self, busy: bool) {
        debug!(busy, "Control state");
    }
}

/// Add a product through the storefront API.
///
/// # Errors
///
/// Returns an error if the server did not accept the item. The reason has
/// already been reported as a notification.
pub async fn add_to_cart(
    ctx: &Context,
    product_id: ProductId,
    quantity: Quantity,
) -> Result<(), Box<dyn std::error::Error>> {
    let added = ctx
        .actions
        .add_to_cart_from_control(&LogControl, product_id, quantity)
        .await
        .ok_or("Item was not added to the cart")?;

    if let Some(message) = added.message {
        info!(%message, "Server response");
    }
    Ok(())
}

/// Start checkout for a single product.
///
/// # Errors
///
/// Returns an error if the server did not accept the order. The reason has
/// already been reported as a notification.
pub async fn buy_now(
    ctx: &Context,
    product_id: ProductId,
    quantity: Quantity,
) -> Result<(), Box<dyn std::error::Error>> {
    let accepted = ctx
        .actions
        .buy_now_from_control(&LogControl, product_id, quantity)
        .await
        .ok_or("Order was not accepted")?;

    if let Some(redirect) = accepted.redirect {
        info!(%redirect, "Continue checkout at");
    }
    Ok(())
}
