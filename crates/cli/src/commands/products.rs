//! Catalog browsing commands.

use chrono::Utc;
use thimble_core::{CurrencyCode, Price, Product, ProductId, StockLevel};

use super::{CliError, Context};

/// List products, optionally filtered by category slug.
pub async fn list(category: Option<&str>) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let catalog = ctx.api.catalog();

    let products = catalog.products(category).await?;
    if products.is_empty() {
        tracing::info!("No products found.");
        return Ok(());
    }

    let now = Utc::now();
    for product in products.iter().filter(|p| p.visible_in_storefront(now)) {
        tracing::info!("{}", summary_line(product));
    }
    Ok(())
}

/// Show one product in detail.
pub async fn show(id: &str) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let catalog = ctx.api.catalog();

    let product = catalog.product(&ProductId::from(id)).await?;
    tracing::info!("{} ({})", product.name, product.id.as_str());
    tracing::info!("Price: {}", display_price(product.price));
    if let Some(old_price) = product.old_price {
        tracing::info!("Was:   {}", display_price(old_price));
    }
    if let Some(category) = &product.category {
        tracing::info!("Category: {category}");
    }
    if let Some(description) = &product.description {
        tracing::info!("{description}");
    }
    if !product.sizes.is_empty() {
        tracing::info!("Sizes:  {}", product.sizes.join(", "));
    }
    if !product.colors.is_empty() {
        tracing::info!("Colors: {}", product.colors.join(", "));
    }
    match product.stock {
        StockLevel::Limited(0) => tracing::info!("Out of stock"),
        StockLevel::Limited(n) => tracing::info!("Stock:  {n}"),
        StockLevel::Unlimited => {}
    }
    if product.is_new(Utc::now()) {
        tracing::info!("New arrival");
    }
    Ok(())
}

/// List categories.
pub async fn categories() -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    let catalog = ctx.api.catalog();

    for category in catalog.categories().await? {
        tracing::info!("{}  ({})", category.name, category.slug);
    }
    Ok(())
}

fn summary_line(product: &Product) -> String {
    let mut line = format!(
        "{}  {}  {}",
        product.id.as_str(),
        product.name,
        display_price(product.price)
    );
    if product.is_discounted() {
        line.push_str("  [sale]");
    }
    if product.stock == StockLevel::Limited(0) {
        line.push_str("  [out of stock]");
    }
    line
}

fn display_price(amount: rust_decimal::Decimal) -> Price {
    Price::new(amount, CurrencyCode::default())
}
