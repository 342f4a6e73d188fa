//! Order commands. Both require a signed-in account.

use thimble_core::{CurrencyCode, Order, OrderContact, Price};

use super::{CliError, Context};

/// Submit the current cart as an order, then clear the cart.
pub async fn create(name: String, phone: String, address: String) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let (_, signed_in) = ctx.session().await?;
    if !signed_in {
        return Err(CliError::SignedOut);
    }

    let mut cart = ctx.cart().await?;
    if cart.lines().is_empty() {
        tracing::info!("The cart is empty; nothing to order.");
        return Ok(());
    }

    let contact = OrderContact {
        name,
        phone,
        address,
    };
    let order = ctx.api.orders().create(cart.lines(), &contact).await?;
    cart.clear().await;

    tracing::info!("Order placed.");
    print_order(&order);
    Ok(())
}

/// List the signed-in account's orders.
pub async fn list() -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let (_, signed_in) = ctx.session().await?;
    if !signed_in {
        return Err(CliError::SignedOut);
    }

    let orders = ctx.api.orders().mine().await?;
    if orders.is_empty() {
        tracing::info!("No orders yet.");
        return Ok(());
    }
    for order in &orders {
        print_order(order);
    }
    Ok(())
}

fn print_order(order: &Order) {
    tracing::info!(
        "{}  {:?}  {} lines  {}",
        order.id,
        order.status,
        order.items.len(),
        Price::new(order.total, CurrencyCode::default()),
    );
}
