//! Favorites commands. The list is device-local and needs no session.

use thimble_core::{CurrencyCode, Price, ProductId};
use thimble_client::favorites::Favorites;

use super::{CliError, Context};

/// List favorite products.
pub fn list() -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let favorites = Favorites::new(ctx.store);

    if favorites.products().is_empty() {
        tracing::info!("No favorites yet.");
        return Ok(());
    }
    for product in favorites.products() {
        tracing::info!(
            "{}  {}  {}",
            product.id.as_str(),
            product.name,
            Price::new(product.price, CurrencyCode::default()),
        );
    }
    Ok(())
}

/// Add a product to the favorites.
pub async fn add(product: &str) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let id = ProductId::from(product);
    let mut favorites = Favorites::new(ctx.store.clone());

    if favorites.contains(&id) {
        tracing::info!("Already a favorite.");
        return Ok(());
    }

    let catalog = ctx.api.catalog();
    let product = catalog.product(&id).await?;
    favorites.add(&product);
    tracing::info!("Added {} to favorites.", product.name);
    Ok(())
}

/// Flip a product's favorite status, fetching it when it gets added.
pub async fn toggle(product: &str) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let id = ProductId::from(product);
    let mut favorites = Favorites::new(ctx.store.clone());

    if favorites.contains(&id) {
        favorites.remove(&id);
        tracing::info!("Removed from favorites.");
        return Ok(());
    }

    let catalog = ctx.api.catalog();
    let product = catalog.product(&id).await?;
    favorites.add(&product);
    tracing::info!("Added {} to favorites.", product.name);
    Ok(())
}

/// Remove a product from the favorites.
pub fn remove(product: &str) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let mut favorites = Favorites::new(ctx.store);

    favorites.remove(&ProductId::from(product));
    tracing::info!("Removed from favorites.");
    Ok(())
}

/// Empty the favorites list.
pub fn clear() -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let mut favorites = Favorites::new(ctx.store);

    favorites.clear();
    tracing::info!("Favorites cleared.");
    Ok(())
}
