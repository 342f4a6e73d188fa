//! Cart commands.
//!
//! Every command rebuilds the cart service from the stored state, so the
//! cart behaves the same across invocations as it would across page loads:
//! signed out it lives in the local store, signed in it syncs with the
//! account's remote cart.

use thimble_core::{CurrencyCode, LineItemId, Price, ProductId};
use thimble_client::cart::AuthorityMode;

use super::{CliError, Context};

/// Show the cart's lines, count, and total.
pub async fn show() -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let cart = ctx.cart().await?;

    if cart.lines().is_empty() {
        tracing::info!("The cart is empty.");
        return Ok(());
    }

    for line in cart.lines() {
        tracing::info!(
            "{}  {} ({}/{})  x{}  {}",
            line.id.as_str(),
            line.product.name,
            line.size,
            line.color,
            line.quantity,
            Price::new(line.line_total(), CurrencyCode::default()),
        );
    }
    tracing::info!(
        "{} items, total {}",
        cart.count(),
        Price::new(cart.total(), CurrencyCode::default()),
    );
    if cart.mode() == AuthorityMode::Guest {
        tracing::info!("(guest cart; sign in to sync it with an account)");
    }
    Ok(())
}

/// Add a product to the cart.
pub async fn add(product: &str, size: &str, color: &str, quantity: i64) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let catalog = ctx.api.catalog();

    let product = catalog.product(&ProductId::from(product)).await?;
    let mut cart = ctx.cart().await?;
    cart.add(&product, size, color, quantity).await?;

    tracing::info!(
        "Added {} ({size}/{color}). {} items in the cart.",
        product.name,
        cart.count()
    );
    Ok(())
}

/// Change a line's quantity. Zero or less removes the line.
pub async fn update(item: &str, quantity: i64) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let mut cart = ctx.cart().await?;

    cart.update_quantity(&LineItemId::from(item), quantity).await?;
    tracing::info!("Cart updated. {} items.", cart.count());
    Ok(())
}

/// Remove a line from the cart.
pub async fn remove(item: &str) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let mut cart = ctx.cart().await?;

    cart.remove(&LineItemId::from(item)).await;
    tracing::info!("Line removed. {} items remain.", cart.count());
    Ok(())
}

/// Empty the cart.
pub async fn clear() -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let mut cart = ctx.cart().await?;

    cart.clear().await;
    tracing::info!("Cart cleared.");
    Ok(())
}
