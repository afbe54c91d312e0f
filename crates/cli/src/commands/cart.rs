//! Local cart commands.
//!
//! Every mutation reconciles with the server afterwards: an empty cart pulls
//! the saved server cart, a nonempty one is pushed to the server.

use techstore_core::{ProductId, Quantity};
use tracing::info;

use super::Context;

/// Log each line of the local cart.
pub fn show(ctx: &Context) {
    let cart = ctx.cart.get();

    if cart.is_empty() {
        info!("Cart is empty");
        return;
    }

    for line in &cart {
        info!(product_id = %line.product_id, quantity = %line.quantity, "Cart line");
    }
    info!(lines = cart.len(), total = cart.total_quantity(), "Cart total");
}

/// Log the total quantity of the local cart.
pub fn count(ctx: &Context) {
    info!(count = ctx.cart.get_count(), "Cart count");
}

/// Add units of a product to the local cart.
///
/// # Errors
///
/// Returns an error if the local store cannot be written.
pub async fn add(
    ctx: &Context,
    product_id: ProductId,
    quantity: Quantity,
) -> Result<(), Box<dyn std::error::Error>> {
    ctx.cart.add(product_id, quantity).await?;
    Ok(())
}

/// Remove a product from the local cart.
///
/// # Errors
///
/// Returns an error if the local store cannot be written.
pub async fn remove(ctx: &Context, product_id: ProductId) -> Result<(), Box<dyn std::error::Error>> {
    ctx.cart.remove(product_id).await?;
    Ok(())
}

/// Set a product's quantity in the local cart.
///
/// # Errors
///
/// Returns an error if the local store cannot be written.
pub async fn set(
    ctx: &Context,
    product_id: ProductId,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    ctx.cart.set_quantity(product_id, quantity).await?;
    Ok(())
}

/// Delete the local cart.
///
/// # Errors
///
/// Returns an error if the local store cannot be written.
pub async fn clear(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    ctx.cart.clear().await?;
    Ok(())
}

/// Reconcile the local cart with the server.
pub async fn sync(ctx: &Context) {
    let count = ctx.cart.update_count().await;
    info!(count, "Cart reconciled");
}

/// Drop the local cart after logging out.
///
/// # Errors
///
/// Returns an error if the local store cannot be written.
pub async fn logout(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    ctx.cart.logout().await?;
    Ok(())
}
